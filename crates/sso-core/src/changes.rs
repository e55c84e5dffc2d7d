use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mapping::{Casing, MappedUserRecord, UserField};

/// One field-level mutation for UpdateUser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOperation {
    pub attribute_path: String,
    pub attribute_value: Value,
}

/// Ordered list of change operations, in the new record's field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(Vec<ChangeOperation>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operation: ChangeOperation) {
        self.0.push(operation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeOperation> {
        self.0.iter()
    }

    /// The operation targeting `field`, if any.
    pub fn find(&self, field: UserField) -> Option<&ChangeOperation> {
        self.0
            .iter()
            .find(|op| op.attribute_path == field.attribute_path())
    }

    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(|op| op.attribute_path.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeOperation;
    type IntoIter = std::slice::Iter<'a, ChangeOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<ChangeOperation> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ChangeOperation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Compare two records field by field.
///
/// Every field present in `new` whose value differs structurally from the
/// same field in `old` yields one operation carrying the new value. Fields
/// omitted from `new` yield nothing: an attribute cannot be cleared by
/// leaving it out.
pub fn diff(old: &MappedUserRecord, new: &MappedUserRecord) -> ChangeSet {
    UserField::ALL
        .into_iter()
        .filter_map(|field| {
            let new_value = new.field_value(field, Casing::Update)?;
            let old_value = old.field_value(field, Casing::Update);
            if old_value.as_ref() == Some(&new_value) {
                return None;
            }
            Some(ChangeOperation {
                attribute_path: field.attribute_path().to_string(),
                attribute_value: new_value,
            })
        })
        .collect()
}
