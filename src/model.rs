//! Domain entities and their single-table encodings.
//!
//! Each entity owns a private record layout: the exact attributes it is stored with,
//! keys included. [`Mapper::to_record`] serialises the layout with `serde_dynamo`,
//! [`Mapper::from_record`] deserialises it and rebuilds the domain fields from the
//! key attributes, leaving the internal attributes behind.

mod customer;
mod invoice;
mod order;
mod order_item;
mod product;
mod shipment;
mod shipment_item;
mod warehouse;

pub use customer::Customer;
pub use invoice::{Invoice, Payment};
pub use order::Order;
pub use order_item::OrderItem;
pub use product::Product;
pub use shipment::Shipment;
pub use shipment_item::ShipmentItem;
pub use warehouse::Warehouse;

use crate::{
    common::Record,
    error::{Error, Result},
    keys::{self, Prefix},
};

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, mem};

/// Discriminator stored in the `entityType` attribute of every record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    /// [`Customer`]
    Customer,
    /// [`Invoice`]
    Invoice,
    /// [`Order`]
    Order,
    /// [`OrderItem`]
    OrderItem,
    /// [`Product`]
    Product,
    /// [`Shipment`]
    Shipment,
    /// [`ShipmentItem`]
    ShipmentItem,
    /// [`Warehouse`]
    Warehouse,
}

impl EntityType {
    /// The stored discriminator value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Invoice => "invoice",
            Self::Order => "order",
            Self::OrderItem => "orderItem",
            Self::Product => "product",
            Self::Shipment => "shipment",
            Self::ShipmentItem => "shipmentItem",
            Self::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion between a domain entity and its stored record.
pub trait Mapper: Sized {
    /// Discriminator written to, and expected in, the record.
    const ENTITY_TYPE: EntityType;

    /// Build the record: keys, GSI keys, discriminator and payload.
    ///
    /// Defaults must already be filled in; an unassigned identity or date fails with
    /// [`Error::MissingField`].
    fn to_record(&self) -> Result<Record>;

    /// Rebuild the entity from a record written by [`Mapper::to_record`].
    fn from_record(record: Record) -> Result<Self>;
}

pub(crate) fn encode<T: Serialize>(layout: T) -> Result<Record> {
    Ok(serde_dynamo::to_item(layout)?)
}

pub(crate) fn decode<T: DeserializeOwned>(record: Record, expected: EntityType) -> Result<T> {
    let found = record
        .get(keys::ENTITY_TYPE)
        .and_then(|value| value.as_s().ok())
        .map(String::as_str)
        .unwrap_or_default();
    if found != expected.as_str() {
        return Err(Error::EntityTypeMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(serde_dynamo::from_item(record)?)
}

pub(crate) fn required<'a, T>(
    value: &'a Option<T>,
    entity_type: EntityType,
    field: &'static str,
) -> Result<&'a T> {
    value.as_ref().ok_or(Error::MissingField { entity_type, field })
}

/// Tag an identifier for a key attribute.
///
/// An identifier that is empty once its tags are stripped would be written as a bare
/// tag that no longer decodes, so it fails with [`Error::MissingField`] instead.
pub(crate) fn key(
    id: &str,
    prefix: Prefix,
    entity_type: EntityType,
    field: &'static str,
) -> Result<String> {
    if keys::strip_prefix(id, prefix).is_empty() {
        return Err(Error::MissingField { entity_type, field });
    }
    Ok(keys::encode_key(id, prefix))
}

/// Store decimal attributes as numbers.
///
/// Decimals serialise to their exact string form; the digits move unchanged into an
/// `N` value.
pub(crate) fn as_numbers(record: &mut Record, fields: &[&str]) {
    for field in fields {
        if let Some(AttributeValue::S(value)) = record.get_mut(*field) {
            let value = mem::take(value);
            record.insert(field.to_string(), AttributeValue::N(value));
        }
    }
}

/// Turn stored numbers back into their exact digits before decoding decimals.
pub(crate) fn as_strings(record: &mut Record, fields: &[&str]) {
    for field in fields {
        if let Some(AttributeValue::N(value)) = record.get_mut(*field) {
            let value = mem::take(value);
            record.insert(field.to_string(), AttributeValue::S(value));
        }
    }
}
