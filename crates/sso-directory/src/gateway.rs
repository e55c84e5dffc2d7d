use sso_core::{ChangeSet, MappedUserRecord};

use crate::error::DirectoryError;
use crate::store::{DirectoryUser, IdentityStore};

/// Create, update and delete directory users through an [`IdentityStore`].
///
/// Failures from the store are returned as-is; retries belong to the
/// orchestrator.
pub struct DirectoryGateway<S> {
    store: S,
}

impl<S: IdentityStore> DirectoryGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the user and return its id, which becomes the physical id.
    pub async fn create(&self, record: &MappedUserRecord) -> Result<String, DirectoryError> {
        tracing::info!(
            identity_store_id = %record.identity_store_id,
            user_name = %record.user_name,
            "creating user"
        );
        match self.store.create_user(record).await? {
            Some(user_id) => {
                tracing::info!(user_id = %user_id, "created user");
                Ok(user_id)
            }
            None => Err(DirectoryError::CreationFailed(format!(
                "CreateUser returned no UserId for {}",
                record.user_name
            ))),
        }
    }

    /// Apply `changes` in one UpdateUser call. An empty change set is a no-op.
    pub async fn update(
        &self,
        user_id: &str,
        identity_store_id: &str,
        changes: &ChangeSet,
    ) -> Result<(), DirectoryError> {
        if changes.is_empty() {
            tracing::info!(user_id = %user_id, "no changes to user attributes detected");
            return Ok(());
        }

        tracing::info!(
            user_id = %user_id,
            operations = changes.len(),
            paths = ?changes.paths(),
            "updating user"
        );
        self.store
            .update_user(identity_store_id, user_id, changes)
            .await?;
        tracing::info!(user_id = %user_id, "update succeeded");
        Ok(())
    }

    /// Delete the user. No existence check; a missing user surfaces whatever
    /// error the store returns.
    pub async fn delete(&self, user_id: &str, identity_store_id: &str) -> Result<(), DirectoryError> {
        tracing::info!(
            user_id = %user_id,
            identity_store_id = %identity_store_id,
            "deleting user"
        );
        self.store.delete_user(identity_store_id, user_id).await?;
        tracing::info!(user_id = %user_id, "delete succeeded");
        Ok(())
    }

    pub async fn find(
        &self,
        identity_store_id: &str,
        user_name: &str,
    ) -> Result<Option<DirectoryUser>, DirectoryError> {
        tracing::info!(user_name = %user_name, "checking whether user already exists");
        let found = self.store.find_user(identity_store_id, user_name).await?;
        match &found {
            Some(user) => tracing::info!(
                user_name = %user_name,
                user_id = %user.user_id,
                "found existing user"
            ),
            None => tracing::info!(user_name = %user_name, "username does not exist"),
        }
        Ok(found)
    }
}
