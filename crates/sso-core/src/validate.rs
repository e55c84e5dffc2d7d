use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::changes::ChangeSet;
use crate::error::CoreError;
use crate::mapping::{MappedUserRecord, UserField};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("email pattern compiles")
});

/// Reject changes to fields that are fixed once a user exists.
///
/// Must run before any UpdateUser call.
pub fn validate_changes(changes: &ChangeSet, old: &MappedUserRecord) -> Result<(), CoreError> {
    if let Some(op) = changes.find(UserField::UserName) {
        return Err(CoreError::ImmutableField {
            field: UserField::UserName.attribute_path().into(),
            message: format!(
                "SSO usernames cannot be updated in place ({} -> {}). Delete and recreate the \
                 user instead by giving the resource a new logical id with the new username.",
                old.user_name,
                display(&op.attribute_value),
            ),
        });
    }

    if let Some(op) = changes.find(UserField::IdentityStoreId) {
        return Err(CoreError::ImmutableField {
            field: UserField::IdentityStoreId.attribute_path().into(),
            message: format!(
                "identityStoreId cannot be changed for a user. Expected {} but received {}",
                old.identity_store_id,
                display(&op.attribute_value),
            ),
        });
    }

    Ok(())
}

fn display(value: &Value) -> String {
    value
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| value.to_string())
}

/// Constraints on usernames, checked before a user is created or updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserNamePolicy {
    pub require_email: bool,
    /// Exact, case-sensitive domain names. Empty means any domain.
    pub allowed_email_domains: Vec<String>,
}

impl UserNamePolicy {
    pub fn check(&self, user_name: &str) -> Result<(), CoreError> {
        let is_email = is_email(user_name);

        if self.require_email && !is_email {
            return Err(CoreError::InvalidUserName {
                user_name: user_name.to_string(),
                reason: "username must be an email address".into(),
            });
        }

        if is_email && !self.allowed_email_domains.is_empty() {
            let domain = user_name.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
            let allowed = self
                .allowed_email_domains
                .iter()
                .any(|d| d == domain);
            if !allowed {
                return Err(CoreError::InvalidUserName {
                    user_name: user_name.to_string(),
                    reason: format!(
                        "username must be an email address from one of the following domains: {}",
                        self.allowed_email_domains.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

fn is_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}
