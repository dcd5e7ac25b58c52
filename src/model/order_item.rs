use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    keys::{self, Prefix},
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product line within an order.
///
/// There is at most one item per (order, product). The item is indexed by product on
/// `gsi1` and by customer on `gsi2`, both sorted by date; the date is not stored as a
/// plain attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderItem {
    /// The order the item belongs to.
    pub order_id: String,
    /// The product ordered.
    pub product_id: String,
    /// The customer who placed the order.
    pub customer_id: String,
    /// Unit price.
    pub price: Decimal,
    /// Number of units.
    pub quantity: u32,
    /// When the item was ordered, defaults to the time of the save.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct OrderItemLayout {
    pk: String,
    sk: String,
    gsi1_pk: String,
    gsi1_sk: String,
    gsi2_pk: String,
    gsi2_sk: String,
    price: Decimal,
    quantity: u32,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl OrderItem {
    /// Primary key of the item row.
    pub fn primary_key(order_id: &str, product_id: &str) -> Keys {
        Keys::table(
            keys::encode_key(order_id, Prefix::Order),
            keys::encode_key(product_id, Prefix::Product),
        )
    }

    /// Fill the date and normalise the referenced identifiers.
    pub fn with_defaults(self) -> Self {
        Self {
            order_id: keys::strip_prefix(&self.order_id, Prefix::Order).to_string(),
            product_id: keys::strip_prefix(&self.product_id, Prefix::Product).to_string(),
            customer_id: keys::strip_prefix(&self.customer_id, Prefix::Customer).to_string(),
            date: Some(keys::truncate_timestamp(self.date.unwrap_or_else(Utc::now))),
            ..self
        }
    }
}

impl Mapper for OrderItem {
    const ENTITY_TYPE: EntityType = EntityType::OrderItem;

    fn to_record(&self) -> Result<Record> {
        let date = keys::encode_timestamp(super::required(&self.date, Self::ENTITY_TYPE, "date")?);
        let product_key =
            super::key(&self.product_id, Prefix::Product, Self::ENTITY_TYPE, "product_id")?;
        let mut record = super::encode(OrderItemLayout {
            pk: super::key(&self.order_id, Prefix::Order, Self::ENTITY_TYPE, "order_id")?,
            sk: product_key.clone(),
            gsi1_pk: product_key,
            gsi1_sk: date.clone(),
            gsi2_pk: super::key(&self.customer_id, Prefix::Customer, Self::ENTITY_TYPE, "customer_id")?,
            gsi2_sk: date,
            price: self.price,
            quantity: self.quantity,
            entity_type: Self::ENTITY_TYPE,
        })?;
        super::as_numbers(&mut record, &["price"]);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        super::as_strings(&mut record, &["price"]);
        let layout: OrderItemLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            order_id: keys::decode_key(&layout.pk, Prefix::Order)?,
            product_id: keys::decode_key(&layout.sk, Prefix::Product)?,
            customer_id: keys::decode_key(&layout.gsi2_pk, Prefix::Customer)?,
            price: layout.price,
            quantity: layout.quantity,
            date: Some(keys::decode_timestamp(&layout.gsi1_sk)?),
        })
    }
}
