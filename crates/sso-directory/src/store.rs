use std::future::Future;
use std::pin::Pin;

use sso_core::{ChangeSet, MappedUserRecord};

use crate::error::DirectoryError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A user read back from the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub user_id: String,
    pub record: MappedUserRecord,
}

/// One method per Identity Store API call. Implementations issue exactly one
/// request per call (two for `find_user`) and never retry.
///
/// Methods return boxed futures for dyn compatibility.
pub trait IdentityStore: Send + Sync {
    /// CreateUser. Returns the new user id, `None` if the response carried none.
    fn create_user<'a>(
        &'a self,
        record: &'a MappedUserRecord,
    ) -> BoxFuture<'a, Result<Option<String>, DirectoryError>>;

    /// UpdateUser with every operation in one batch.
    fn update_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
        changes: &'a ChangeSet,
    ) -> BoxFuture<'a, Result<(), DirectoryError>>;

    /// DeleteUser.
    fn delete_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<(), DirectoryError>>;

    /// Look a user up by username. `None` if no such user exists.
    fn find_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<DirectoryUser>, DirectoryError>>;
}
