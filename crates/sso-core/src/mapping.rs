//! Translation from the compact [`UserAttributes`] shape to the verbose
//! record the Identity Store API expects.
//!
//! The record is canonicalized once, in the lowerCamel casing UpdateUser
//! uses for attribute paths. [`Casing::Create`] renders the PascalCase
//! shape of the CreateUser request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::user::UserAttributes;

/// Key casing of a rendered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// `UserName`, `DisplayName`, ... as in CreateUser.
    Create,
    /// `userName`, `displayName`, ... as in UpdateUser attribute paths.
    Update,
}

impl Casing {
    /// Render a canonical lowerCamel key in this casing.
    pub fn key(self, canonical: &str) -> String {
        match self {
            Self::Create => upper_first(canonical),
            Self::Update => lower_first(canonical),
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Top-level fields of a [`MappedUserRecord`], in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    IdentityStoreId,
    UserName,
    Name,
    DisplayName,
    Emails,
    PhoneNumbers,
    Title,
    UserType,
}

impl UserField {
    pub const ALL: [UserField; 8] = [
        Self::IdentityStoreId,
        Self::UserName,
        Self::Name,
        Self::DisplayName,
        Self::Emails,
        Self::PhoneNumbers,
        Self::Title,
        Self::UserType,
    ];

    /// The UpdateUser attribute path for this field.
    pub fn attribute_path(self) -> &'static str {
        match self {
            Self::IdentityStoreId => "identityStoreId",
            Self::UserName => "userName",
            Self::Name => "name",
            Self::DisplayName => "displayName",
            Self::Emails => "emails",
            Self::PhoneNumbers => "phoneNumbers",
            Self::Title => "title",
            Self::UserType => "userType",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub given_name: String,
    pub family_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
}

impl PersonName {
    fn to_value(&self, casing: Casing) -> Value {
        let mut map = Map::new();
        map.insert(casing.key("givenName"), Value::String(self.given_name.clone()));
        map.insert(casing.key("familyName"), Value::String(self.family_name.clone()));
        if let Some(middle) = &self.middle_name {
            map.insert(casing.key("middleName"), Value::String(middle.clone()));
        }
        Value::Object(map)
    }
}

/// One entry of the `emails` / `phoneNumbers` lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactValue {
    pub value: String,
    pub primary: bool,
}

impl ContactValue {
    pub fn primary(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            primary: true,
        }
    }

    fn to_value(&self, casing: Casing) -> Value {
        let mut map = Map::new();
        map.insert(casing.key("value"), Value::String(self.value.clone()));
        map.insert(casing.key("primary"), Value::Bool(self.primary));
        Value::Object(map)
    }
}

/// API-shape projection of a user, scoped to one identity store.
///
/// Derived from [`UserAttributes`] on every reconciliation, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedUserRecord {
    pub identity_store_id: String,
    pub user_name: String,
    pub name: PersonName,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<ContactValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<ContactValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl MappedUserRecord {
    /// Value of one top-level field, `None` when the field is omitted.
    pub fn field_value(&self, field: UserField, casing: Casing) -> Option<Value> {
        let contacts = |list: &Vec<ContactValue>| {
            Value::Array(list.iter().map(|c| c.to_value(casing)).collect())
        };

        match field {
            UserField::IdentityStoreId => Some(Value::String(self.identity_store_id.clone())),
            UserField::UserName => Some(Value::String(self.user_name.clone())),
            UserField::Name => Some(self.name.to_value(casing)),
            UserField::DisplayName => Some(Value::String(self.display_name.clone())),
            UserField::Emails => self.emails.as_ref().map(contacts),
            UserField::PhoneNumbers => self.phone_numbers.as_ref().map(contacts),
            UserField::Title => self.title.clone().map(Value::String),
            UserField::UserType => self.user_type.clone().map(Value::String),
        }
    }

    /// Render the whole record with keys in the given casing.
    pub fn to_value(&self, casing: Casing) -> Value {
        let map = UserField::ALL
            .into_iter()
            .filter_map(|field| {
                self.field_value(field, casing)
                    .map(|value| (casing.key(field.attribute_path()), value))
            })
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }

    /// Equality that ignores the order of the contact lists.
    pub fn same_attributes(&self, other: &MappedUserRecord) -> bool {
        self.sorted() == other.sorted()
    }

    fn sorted(&self) -> MappedUserRecord {
        let mut copy = self.clone();
        if let Some(list) = copy.emails.as_mut() {
            list.sort();
        }
        if let Some(list) = copy.phone_numbers.as_mut() {
            list.sort();
        }
        copy
    }
}

/// Map compact user attributes into the Identity Store record shape.
pub fn map_user(attributes: &UserAttributes, identity_store_id: &str) -> MappedUserRecord {
    MappedUserRecord {
        identity_store_id: identity_store_id.to_string(),
        user_name: attributes.user_name.clone(),
        name: PersonName {
            given_name: attributes.first_name.clone(),
            family_name: attributes.last_name.clone(),
            middle_name: attributes.middle_name.clone(),
        },
        display_name: format!("{} {}", attributes.first_name, attributes.last_name),
        emails: attributes
            .email
            .as_ref()
            .map(|email| vec![ContactValue::primary(email)]),
        phone_numbers: attributes
            .phone_number
            .as_ref()
            .map(|phone| vec![ContactValue::primary(phone)]),
        title: attributes.title.clone(),
        user_type: attributes.user_type.clone(),
    }
}
