use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order placed by a customer.
///
/// Stored under `pk = o#{id}`, `sk = c#{customer_id}`: the customer lives in the
/// sort key only, so there is exactly one row per (order, customer).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Order {
    /// Order identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// The customer who placed the order.
    pub customer_id: String,
    /// When the order was placed, defaults to the time of the save.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct OrderLayout {
    pk: String,
    sk: String,
    date: String,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Order {
    /// Primary key of the order row.
    pub fn primary_key(order_id: &str, customer_id: &str) -> Keys {
        Keys::table(
            keys::encode_key(order_id, Prefix::Order),
            keys::encode_key(customer_id, Prefix::Customer),
        )
    }

    /// Fill the identity and the date, normalising identifiers.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Order)),
            customer_id: keys::strip_prefix(&self.customer_id, Prefix::Customer).to_string(),
            date: Some(keys::truncate_timestamp(self.date.unwrap_or_else(Utc::now))),
        }
    }
}

impl Mapper for Order {
    const ENTITY_TYPE: EntityType = EntityType::Order;

    fn to_record(&self) -> Result<Record> {
        let id = super::required(&self.id, Self::ENTITY_TYPE, "id")?;
        let date = super::required(&self.date, Self::ENTITY_TYPE, "date")?;
        super::encode(OrderLayout {
            pk: super::key(id, Prefix::Order, Self::ENTITY_TYPE, "id")?,
            sk: super::key(&self.customer_id, Prefix::Customer, Self::ENTITY_TYPE, "customer_id")?,
            date: keys::encode_timestamp(date),
            entity_type: Self::ENTITY_TYPE,
        })
    }

    fn from_record(record: Record) -> Result<Self> {
        let layout: OrderLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.pk, Prefix::Order)?),
            customer_id: keys::decode_key(&layout.sk, Prefix::Customer)?,
            date: Some(keys::decode_timestamp(&layout.date)?),
        })
    }
}
