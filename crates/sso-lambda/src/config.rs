use std::env;

use sso_core::UserNamePolicy;

use crate::error::HandlerError;

pub const ENV_REGION: &str = "SSO_REGION";
pub const ENV_IDENTITY_STORE_ID: &str = "SSO_IDENTITY_STORE_ID";
pub const ENV_ALLOW_IMPORT: &str = "SSO_ALLOW_IMPORT_EXISTING_USER";
pub const ENV_REQUIRE_EMAIL: &str = "SSO_REQUIRE_USERNAME_AS_EMAIL";
pub const ENV_ALLOWED_DOMAINS: &str = "SSO_ALLOWED_EMAIL_DOMAINS";

/// Handler configuration, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Region of the Identity Store client.
    pub region: String,
    /// Used when an event does not carry `identityStoreId`.
    pub default_identity_store_id: Option<String>,
    /// Adopt a pre-existing user with identical attributes on Create.
    pub allow_import_existing_user: bool,
    pub user_name_policy: UserNamePolicy,
}

impl HandlerConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            default_identity_store_id: None,
            allow_import_existing_user: false,
            user_name_policy: UserNamePolicy::default(),
        }
    }

    pub fn from_env() -> Result<Self, HandlerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HandlerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let region = non_empty(ENV_REGION).ok_or_else(|| {
            HandlerError::Config(format!("{ENV_REGION} must be set in the environment"))
        })?;

        let allowed_email_domains = non_empty(ENV_ALLOWED_DOMAINS)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            region,
            default_identity_store_id: non_empty(ENV_IDENTITY_STORE_ID),
            allow_import_existing_user: parse_flag(ENV_ALLOW_IMPORT, non_empty(ENV_ALLOW_IMPORT))?,
            user_name_policy: UserNamePolicy {
                require_email: parse_flag(ENV_REQUIRE_EMAIL, non_empty(ENV_REQUIRE_EMAIL))?,
                allowed_email_domains,
            },
        })
    }
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool, HandlerError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(HandlerError::Config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
