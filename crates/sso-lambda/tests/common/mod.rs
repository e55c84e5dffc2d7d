#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::{json, Value};
use sso_core::{ChangeSet, MappedUserRecord};
use sso_directory::{BoxFuture, DirectoryError, DirectoryGateway, DirectoryUser, IdentityStore};
use sso_lambda::{HandlerConfig, UserReconciler};

/// A call that reached the identity store.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(MappedUserRecord),
    Update {
        identity_store_id: String,
        user_id: String,
        changes: ChangeSet,
    },
    Delete {
        identity_store_id: String,
        user_id: String,
    },
    Find {
        identity_store_id: String,
        user_name: String,
    },
}

/// In-memory stand-in for the Identity Store API that records every call.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    pub created_id: Option<String>,
    pub existing: Option<DirectoryUser>,
}

impl RecordingStore {
    pub fn returning(id: &str) -> Self {
        Self {
            created_id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_existing(mut self, user: DirectoryUser) -> Self {
        self.existing = Some(user);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl IdentityStore for RecordingStore {
    fn create_user<'a>(
        &'a self,
        record: &'a MappedUserRecord,
    ) -> BoxFuture<'a, Result<Option<String>, DirectoryError>> {
        Box::pin(async move {
            self.record(Call::Create(record.clone()));
            Ok(self.created_id.clone())
        })
    }

    fn update_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
        changes: &'a ChangeSet,
    ) -> BoxFuture<'a, Result<(), DirectoryError>> {
        Box::pin(async move {
            self.record(Call::Update {
                identity_store_id: identity_store_id.to_string(),
                user_id: user_id.to_string(),
                changes: changes.clone(),
            });
            Ok(())
        })
    }

    fn delete_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<(), DirectoryError>> {
        Box::pin(async move {
            self.record(Call::Delete {
                identity_store_id: identity_store_id.to_string(),
                user_id: user_id.to_string(),
            });
            Ok(())
        })
    }

    fn find_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<DirectoryUser>, DirectoryError>> {
        Box::pin(async move {
            self.record(Call::Find {
                identity_store_id: identity_store_id.to_string(),
                user_name: user_name.to_string(),
            });
            Ok(self
                .existing
                .clone()
                .filter(|u| u.record.user_name == user_name))
        })
    }
}

pub const STORE_ID: &str = "d-1234567890";

pub fn reconciler(store: RecordingStore) -> UserReconciler<RecordingStore> {
    reconciler_with(store, HandlerConfig::new("us-east-1"))
}

pub fn reconciler_with(
    store: RecordingStore,
    config: HandlerConfig,
) -> UserReconciler<RecordingStore> {
    UserReconciler::new(DirectoryGateway::new(store), config)
}

pub fn properties(user_attributes: Value) -> Value {
    json!({
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:sso-provider",
        "identityStoreId": STORE_ID,
        "userAttributes": user_attributes,
        "retainUserIfStackDeleted": "false",
    })
}

pub fn jane(title: &str) -> Value {
    json!({
        "userName": "jane@example.com",
        "firstName": "Jane",
        "lastName": "Smith",
        "title": title,
    })
}
