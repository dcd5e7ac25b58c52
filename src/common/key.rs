use crate::{common, keys};

use aws_sdk_dynamodb::types;
use std::collections;

/// Key component.
///
/// ```rust
/// use dynamodb_orders::common::key;
///
/// let key = key::Key {
///     name: "pk".to_string(),
///     value: "o#1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: String,
}

impl Key {
    /// Build a key component from an attribute name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Primary key (partition key and optional sort key).
///
/// ```rust
/// use dynamodb_orders::common::key;
///
/// let keys = key::Keys::table("o#1", "c#2");
/// assert_eq!(keys.partition_key.name, "pk");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Keys {
    /// The partition key (required).
    pub partition_key: Key,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key>,
}

impl Keys {
    /// Primary key of the single table, under the `pk`/`sk` attributes.
    pub fn table(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: Key::new(keys::PK, partition_key),
            sort_key: Some(Key::new(keys::SK, sort_key)),
        }
    }

    /// Read the `pk`/`sk` pair of a stored record.
    ///
    /// Returns `None` when either attribute is missing or not a string.
    pub fn of_record(record: &common::Record) -> Option<Self> {
        let partition_key = record.get(keys::PK)?.as_s().ok()?;
        let sort_key = record.get(keys::SK)?.as_s().ok()?;
        Some(Self::table(partition_key.as_str(), sort_key.as_str()))
    }
}

impl From<Keys> for collections::HashMap<String, types::AttributeValue> {
    fn from(key: Keys) -> Self {
        let mut keys = Self::from([(
            key.partition_key.name,
            types::AttributeValue::S(key.partition_key.value),
        )]);
        if let Some(sort_key) = key.sort_key {
            keys.insert(sort_key.name, types::AttributeValue::S(sort_key.value));
        }
        keys
    }
}
