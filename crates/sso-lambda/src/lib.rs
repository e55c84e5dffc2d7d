//! sso-lambda
//!
//! Custom-resource handler for SSO directory users: configuration, event
//! dispatch and the Create/Update/Delete reconcilers. `main.rs` wires this
//! to the Lambda runtime.

pub mod config;
pub mod error;
pub mod logging;
pub mod reconciler;

pub use crate::config::HandlerConfig;
pub use crate::error::HandlerError;
pub use crate::reconciler::UserReconciler;
