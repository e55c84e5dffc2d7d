use aws_config::{BehaviorVersion, Region};
use aws_sdk_identitystore::Client;
use aws_sdk_identitystore::types::{
    AlternateIdentifier, AttributeOperation, Email, Name, PhoneNumber, UniqueAttribute,
};
use aws_smithy_types::Document;

use sso_core::{ChangeSet, ContactValue, MappedUserRecord, PersonName, UserField};

use crate::document::to_document;
use crate::error::{api_error, DirectoryError};
use crate::store::{BoxFuture, DirectoryUser, IdentityStore};

/// Build an Identity Store client for `region` from the default credential chain.
pub async fn build_client(region: &str) -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}

/// [`IdentityStore`] backed by the AWS Identity Store API.
#[derive(Clone)]
pub struct AwsIdentityStore {
    client: Client,
}

impl AwsIdentityStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl IdentityStore for AwsIdentityStore {
    fn create_user<'a>(
        &'a self,
        record: &'a MappedUserRecord,
    ) -> BoxFuture<'a, Result<Option<String>, DirectoryError>> {
        Box::pin(async move {
            let name = Name::builder()
                .given_name(&record.name.given_name)
                .family_name(&record.name.family_name)
                .set_middle_name(record.name.middle_name.clone())
                .build();

            let emails = record.emails.as_ref().map(|list| {
                list.iter()
                    .map(|c| Email::builder().value(&c.value).primary(c.primary).build())
                    .collect::<Vec<_>>()
            });
            let phone_numbers = record.phone_numbers.as_ref().map(|list| {
                list.iter()
                    .map(|c| PhoneNumber::builder().value(&c.value).primary(c.primary).build())
                    .collect::<Vec<_>>()
            });

            let resp = self
                .client
                .create_user()
                .identity_store_id(&record.identity_store_id)
                .user_name(&record.user_name)
                .name(name)
                .display_name(&record.display_name)
                .set_emails(emails)
                .set_phone_numbers(phone_numbers)
                .set_title(record.title.clone())
                .set_user_type(record.user_type.clone())
                .send()
                .await
                .map_err(|e| api_error("CreateUser", &e))?;

            let user_id = text(resp.user_id());
            Ok((!user_id.is_empty()).then_some(user_id))
        })
    }

    fn update_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
        changes: &'a ChangeSet,
    ) -> BoxFuture<'a, Result<(), DirectoryError>> {
        Box::pin(async move {
            let operations = changes
                .iter()
                .map(|op| {
                    AttributeOperation::builder()
                        .attribute_path(&op.attribute_path)
                        .attribute_value(to_document(&op.attribute_value))
                        .build()
                        .map_err(|e| DirectoryError::InvalidRequest(e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.client
                .update_user()
                .identity_store_id(identity_store_id)
                .user_id(user_id)
                .set_operations(Some(operations))
                .send()
                .await
                .map_err(|e| api_error("UpdateUser", &e))?;

            Ok(())
        })
    }

    fn delete_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<(), DirectoryError>> {
        Box::pin(async move {
            self.client
                .delete_user()
                .identity_store_id(identity_store_id)
                .user_id(user_id)
                .send()
                .await
                .map_err(|e| api_error("DeleteUser", &e))?;
            Ok(())
        })
    }

    fn find_user<'a>(
        &'a self,
        identity_store_id: &'a str,
        user_name: &'a str,
    ) -> BoxFuture<'a, Result<Option<DirectoryUser>, DirectoryError>> {
        Box::pin(async move {
            let unique = UniqueAttribute::builder()
                .attribute_path(UserField::UserName.attribute_path())
                .attribute_value(Document::String(user_name.to_string()))
                .build()
                .map_err(|e| DirectoryError::InvalidRequest(e.to_string()))?;

            let user_id = match self
                .client
                .get_user_id()
                .identity_store_id(identity_store_id)
                .alternate_identifier(AlternateIdentifier::UniqueAttribute(unique))
                .send()
                .await
            {
                Ok(resp) => text(resp.user_id()),
                Err(e) => {
                    let is_not_found = e
                        .as_service_error()
                        .map(|se| se.is_resource_not_found_exception())
                        .unwrap_or(false);
                    if is_not_found {
                        return Ok(None);
                    }
                    return Err(api_error("GetUserId", &e));
                }
            };

            let user = self
                .client
                .describe_user()
                .identity_store_id(identity_store_id)
                .user_id(&user_id)
                .send()
                .await
                .map_err(|e| api_error("DescribeUser", &e))?;

            let record = record_from_user(
                identity_store_id,
                &DescribedUser {
                    user_name: user.user_name().into(),
                    name: user.name(),
                    display_name: user.display_name().into(),
                    emails: user.emails(),
                    phone_numbers: user.phone_numbers(),
                    title: user.title(),
                    user_type: user.user_type(),
                },
            );

            Ok(Some(DirectoryUser { user_id, record }))
        })
    }
}

/// Attributes of a DescribeUser response that take part in the import
/// comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescribedUser<'a> {
    pub user_name: Option<&'a str>,
    pub name: Option<&'a Name>,
    pub display_name: Option<&'a str>,
    pub emails: &'a [Email],
    pub phone_numbers: &'a [PhoneNumber],
    pub title: Option<&'a str>,
    pub user_type: Option<&'a str>,
}

/// Rebuild the record shape [`sso_core::map_user`] produces from a user read
/// back from the store.
///
/// Empty contact lists become `None` and entries without a value are
/// dropped. A missing `primary` reads as `false`. Contact `type` is not
/// carried over.
pub fn record_from_user(identity_store_id: &str, user: &DescribedUser<'_>) -> MappedUserRecord {
    let name = user.name;
    MappedUserRecord {
        identity_store_id: identity_store_id.to_string(),
        user_name: text(user.user_name),
        name: PersonName {
            given_name: text(name.and_then(|n| n.given_name())),
            family_name: text(name.and_then(|n| n.family_name())),
            middle_name: name.and_then(|n| n.middle_name()).map(String::from),
        },
        display_name: text(user.display_name),
        emails: contacts(user.emails.iter().map(|e| (e.value(), flag(e.primary())))),
        phone_numbers: contacts(
            user.phone_numbers
                .iter()
                .map(|p| (p.value(), flag(p.primary()))),
        ),
        title: user.title.map(String::from),
        user_type: user.user_type.map(String::from),
    }
}

/// Owned text from an SDK accessor, whether the member is modeled as
/// required (`&str`) or optional (`Option<&str>`).
fn text<'s>(value: impl Into<Option<&'s str>>) -> String {
    value.into().unwrap_or_default().to_string()
}

fn flag(value: impl Into<Option<bool>>) -> bool {
    value.into().unwrap_or(false)
}

fn contacts<'s>(
    entries: impl Iterator<Item = (Option<&'s str>, bool)>,
) -> Option<Vec<ContactValue>> {
    let list = entries
        .filter_map(|(value, primary)| {
            value.map(|v| ContactValue {
                value: v.to_string(),
                primary,
            })
        })
        .collect::<Vec<_>>();
    (!list.is_empty()).then_some(list)
}
