use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Compact user record as declared on the custom resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

/// `ResourceProperties` / `OldResourceProperties` of a custom-resource event.
///
/// Unknown keys such as `ServiceToken` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_store_id: Option<String>,
    pub user_attributes: UserAttributes,
    #[serde(default, deserialize_with = "bool_or_string")]
    pub retain_user_if_stack_deleted: bool,
}

impl ResourceProperties {
    /// The identity store this user lives in, falling back to `default` when
    /// the event does not name one.
    pub fn identity_store_id<'a>(&'a self, default: Option<&'a str>) -> Result<&'a str, CoreError> {
        self.identity_store_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(default)
            .ok_or_else(|| CoreError::MissingField("ResourceProperties.identityStoreId".into()))
    }
}

/// CloudFormation delivers every scalar property as a string, so
/// `"true"` and `true` must both deserialize.
fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {other:?}"
            ))),
        },
    }
}
