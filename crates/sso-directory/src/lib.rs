//! sso-directory
//!
//! Directory API gateway. [`IdentityStore`] is the network seam, with
//! [`AwsIdentityStore`] as the Identity Store SDK implementation;
//! [`DirectoryGateway`] owns the create/update/delete contracts on top.

pub mod client;
pub mod document;
pub mod error;
pub mod gateway;
pub mod store;

pub use crate::client::{record_from_user, AwsIdentityStore, DescribedUser};
pub use crate::error::DirectoryError;
pub use crate::gateway::DirectoryGateway;
pub use crate::store::{BoxFuture, DirectoryUser, IdentityStore};
