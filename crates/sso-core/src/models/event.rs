use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::models::user::ResourceProperties;

/// The lifecycle discriminant carried in `RequestType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl FromStr for RequestType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            other => Err(CoreError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom-resource event as delivered by the CDK provider framework.
///
/// This is the wire shape; [`LifecycleEvent`] is what the handler works with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    pub resource_properties: ResourceProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<ResourceProperties>,
}

/// A validated lifecycle event for one logical user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create {
        properties: ResourceProperties,
    },
    Update {
        physical_id: String,
        old_properties: ResourceProperties,
        properties: ResourceProperties,
    },
    Delete {
        physical_id: String,
        properties: ResourceProperties,
    },
}

impl LifecycleEvent {
    /// Parse a raw event payload.
    ///
    /// The discriminant is checked before the rest of the payload so an
    /// unknown request type is always reported as unsupported.
    pub fn from_value(raw: Value) -> Result<Self, CoreError> {
        match raw.get("RequestType") {
            None => return Err(CoreError::MissingField("RequestType".into())),
            Some(Value::String(request_type)) => {
                request_type.parse::<RequestType>()?;
            }
            Some(other) => return Err(CoreError::UnsupportedOperation(other.to_string())),
        }

        let event: CustomResourceEvent = serde_json::from_value(raw)?;
        Self::try_from(event)
    }

    pub fn request_type(&self) -> RequestType {
        match self {
            Self::Create { .. } => RequestType::Create,
            Self::Update { .. } => RequestType::Update,
            Self::Delete { .. } => RequestType::Delete,
        }
    }

    /// The physical id established at creation. `None` for Create.
    pub fn physical_id(&self) -> Option<&str> {
        match self {
            Self::Create { .. } => None,
            Self::Update { physical_id, .. } | Self::Delete { physical_id, .. } => {
                Some(physical_id)
            }
        }
    }

    /// The current (new) resource properties.
    pub fn properties(&self) -> &ResourceProperties {
        match self {
            Self::Create { properties }
            | Self::Update { properties, .. }
            | Self::Delete { properties, .. } => properties,
        }
    }
}

impl TryFrom<CustomResourceEvent> for LifecycleEvent {
    type Error = CoreError;

    fn try_from(event: CustomResourceEvent) -> Result<Self, Self::Error> {
        let physical_id = || {
            event
                .physical_resource_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| CoreError::MissingField("PhysicalResourceId".into()))
        };

        match event.request_type.parse::<RequestType>()? {
            RequestType::Create => Ok(Self::Create {
                properties: event.resource_properties,
            }),
            RequestType::Update => {
                let physical_id = physical_id()?;
                let old_properties = event
                    .old_resource_properties
                    .ok_or_else(|| CoreError::MissingField("OldResourceProperties".into()))?;
                Ok(Self::Update {
                    physical_id,
                    old_properties,
                    properties: event.resource_properties,
                })
            }
            RequestType::Delete => Ok(Self::Delete {
                physical_id: physical_id()?,
                properties: event.resource_properties,
            }),
        }
    }
}

/// Response returned to the provider framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReconciliationResult {
    pub physical_resource_id: String,
    pub data: ResultData,
}

/// Attributes exposed to the stack through `Fn::GetAtt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultData {
    pub user_id: String,
    pub identity_store_id: String,
    pub arn: String,
}

impl ReconciliationResult {
    pub fn for_user(user_id: impl Into<String>, identity_store_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            physical_resource_id: user_id.clone(),
            data: ResultData {
                arn: format!("arn:aws:identitystore:::user/{user_id}"),
                user_id,
                identity_store_id: identity_store_id.into(),
            },
        }
    }
}
