//! sso-core
//!
//! Pure domain types for the SSO user custom resource: lifecycle events,
//! user attributes, the Identity Store record mapping, change-set
//! calculation and validation. No AWS SDK dependency.

pub mod changes;
pub mod error;
pub mod mapping;
pub mod models;
pub mod validate;

pub use crate::changes::{diff, ChangeOperation, ChangeSet};
pub use crate::error::CoreError;
pub use crate::mapping::{map_user, Casing, ContactValue, MappedUserRecord, PersonName, UserField};
pub use crate::models::event::{
    CustomResourceEvent, LifecycleEvent, ReconciliationResult, RequestType, ResultData,
};
pub use crate::models::user::{ResourceProperties, UserAttributes};
pub use crate::validate::{validate_changes, UserNamePolicy};
