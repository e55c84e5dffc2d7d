use serde_json::Value;

use sso_core::{
    diff, map_user, validate_changes, Casing, LifecycleEvent, MappedUserRecord,
    ReconciliationResult, ResourceProperties,
};
use sso_directory::{DirectoryGateway, DirectoryUser, IdentityStore};

use crate::config::HandlerConfig;
use crate::error::HandlerError;
use crate::logging::log_json;

/// Reconciles one `Custom::SsoUser` resource per invocation.
///
/// Holds no state between invocations: every decision is derived from the
/// event payload and the configuration.
pub struct UserReconciler<S> {
    gateway: DirectoryGateway<S>,
    config: HandlerConfig,
}

impl<S: IdentityStore> UserReconciler<S> {
    pub fn new(gateway: DirectoryGateway<S>, config: HandlerConfig) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &DirectoryGateway<S> {
        &self.gateway
    }

    /// Entry point for a raw provider-framework event.
    pub async fn handle(&self, raw: Value) -> Result<ReconciliationResult, HandlerError> {
        log_json("Invoked with event", &raw);
        let event = LifecycleEvent::from_value(raw)?;
        let result = self.dispatch(event).await?;
        log_json("Returning response", &result);
        Ok(result)
    }

    pub async fn dispatch(
        &self,
        event: LifecycleEvent,
    ) -> Result<ReconciliationResult, HandlerError> {
        tracing::info!(request_type = %event.request_type(), "handling lifecycle event");
        match event {
            LifecycleEvent::Create { properties } => self.create(&properties).await,
            LifecycleEvent::Update {
                physical_id,
                old_properties,
                properties,
            } => self.update(&physical_id, &old_properties, &properties).await,
            LifecycleEvent::Delete {
                physical_id,
                properties,
            } => self.delete(&physical_id, &properties).await,
        }
    }

    async fn create(
        &self,
        properties: &ResourceProperties,
    ) -> Result<ReconciliationResult, HandlerError> {
        let store_id = self.identity_store_id(properties)?;
        let user_name = &properties.user_attributes.user_name;
        self.config.user_name_policy.check(user_name)?;

        let record = map_user(&properties.user_attributes, store_id);

        if self.config.allow_import_existing_user {
            if let Some(existing) = self.gateway.find(store_id, user_name).await? {
                return import_existing(existing, &record);
            }
        }

        log_json("Creating user with props", &record.to_value(Casing::Create));
        let user_id = self.gateway.create(&record).await?;
        Ok(ReconciliationResult::for_user(user_id, store_id))
    }

    async fn update(
        &self,
        physical_id: &str,
        old_properties: &ResourceProperties,
        properties: &ResourceProperties,
    ) -> Result<ReconciliationResult, HandlerError> {
        let store_id = self.identity_store_id(properties)?;
        let old_store_id = self.identity_store_id(old_properties)?;

        let old = map_user(&old_properties.user_attributes, old_store_id);
        let new = map_user(&properties.user_attributes, store_id);
        let changes = diff(&old, &new);
        log_json("Change operations", &changes);

        validate_changes(&changes, &old)?;
        self.config
            .user_name_policy
            .check(&properties.user_attributes.user_name)?;

        self.gateway.update(physical_id, store_id, &changes).await?;
        Ok(ReconciliationResult::for_user(physical_id, store_id))
    }

    async fn delete(
        &self,
        physical_id: &str,
        properties: &ResourceProperties,
    ) -> Result<ReconciliationResult, HandlerError> {
        if properties.retain_user_if_stack_deleted {
            tracing::info!(
                user_id = %physical_id,
                "retainUserIfStackDeleted is set, leaving user in the identity store"
            );
            // Nothing is called, so an unresolvable store id is reported as empty.
            let store_id = self.identity_store_id(properties).unwrap_or_default();
            return Ok(ReconciliationResult::for_user(physical_id, store_id));
        }

        let store_id = self.identity_store_id(properties)?;
        self.gateway.delete(physical_id, store_id).await?;
        Ok(ReconciliationResult::for_user(physical_id, store_id))
    }

    fn identity_store_id<'a>(
        &'a self,
        properties: &'a ResourceProperties,
    ) -> Result<&'a str, HandlerError> {
        Ok(properties.identity_store_id(self.config.default_identity_store_id.as_deref())?)
    }
}

/// Adopt a user created outside the stack, provided every requested
/// attribute already matches.
fn import_existing(
    existing: DirectoryUser,
    requested: &MappedUserRecord,
) -> Result<ReconciliationResult, HandlerError> {
    if !existing.record.same_attributes(requested) {
        log_json("Existing user attributes", &existing.record);
        return Err(HandlerError::UserConflict {
            user_name: requested.user_name.clone(),
            user_id: existing.user_id,
        });
    }

    tracing::info!(
        user_name = %requested.user_name,
        user_id = %existing.user_id,
        "username already taken by an identical user, importing it"
    );
    Ok(ReconciliationResult::for_user(
        existing.user_id,
        requested.identity_store_id.clone(),
    ))
}
