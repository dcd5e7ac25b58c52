use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use serde::{Deserialize, Serialize};

/// Quantity of a product put into a shipment for an order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipmentItem {
    /// Shipment item identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// The order the item ships for.
    pub order_id: String,
    /// The product shipped.
    pub product_id: String,
    /// The shipment carrying the item.
    pub shipment_id: String,
    /// Number of units.
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Serialize)]
struct ShipmentItemLayout {
    pk: String,
    sk: String,
    #[serde(rename = "productId")]
    product_id: String,
    #[serde(rename = "shipmentId")]
    shipment_id: String,
    quantity: u32,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl ShipmentItem {
    /// Primary key of the shipment item row.
    pub fn primary_key(order_id: &str, shipment_item_id: &str) -> Keys {
        Keys::table(
            keys::encode_key(order_id, Prefix::Order),
            keys::encode_key(shipment_item_id, Prefix::ShipmentItem),
        )
    }

    /// Fill the identity and normalise the referenced identifiers.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(
                self.id.as_deref(),
                Prefix::ShipmentItem,
            )),
            order_id: keys::strip_prefix(&self.order_id, Prefix::Order).to_string(),
            product_id: keys::strip_prefix(&self.product_id, Prefix::Product).to_string(),
            shipment_id: keys::strip_prefix(&self.shipment_id, Prefix::Shipment).to_string(),
            ..self
        }
    }
}

impl Mapper for ShipmentItem {
    const ENTITY_TYPE: EntityType = EntityType::ShipmentItem;

    fn to_record(&self) -> Result<Record> {
        let id = super::required(&self.id, Self::ENTITY_TYPE, "id")?;
        super::encode(ShipmentItemLayout {
            pk: super::key(&self.order_id, Prefix::Order, Self::ENTITY_TYPE, "order_id")?,
            sk: super::key(id, Prefix::ShipmentItem, Self::ENTITY_TYPE, "id")?,
            product_id: self.product_id.clone(),
            shipment_id: self.shipment_id.clone(),
            quantity: self.quantity,
            entity_type: Self::ENTITY_TYPE,
        })
    }

    fn from_record(record: Record) -> Result<Self> {
        let layout: ShipmentItemLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.sk, Prefix::ShipmentItem)?),
            order_id: keys::decode_key(&layout.pk, Prefix::Order)?,
            product_id: layout.product_id,
            shipment_id: layout.shipment_id,
            quantity: layout.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types::AttributeValue;

    fn item() -> ShipmentItem {
        ShipmentItem {
            id: Some("9".to_string()),
            order_id: "1".to_string(),
            product_id: "2".to_string(),
            shipment_id: "3".to_string(),
            quantity: 5,
        }
    }

    #[test]
    fn test_to_record() {
        assert_eq!(
            item().to_record().unwrap(),
            Record::from([
                ("pk".to_string(), AttributeValue::S("o#1".to_string())),
                ("sk".to_string(), AttributeValue::S("d#9".to_string())),
                ("productId".to_string(), AttributeValue::S("2".to_string())),
                ("shipmentId".to_string(), AttributeValue::S("3".to_string())),
                ("quantity".to_string(), AttributeValue::N("5".to_string())),
                (
                    "entityType".to_string(),
                    AttributeValue::S("shipmentItem".to_string())
                ),
            ])
        );
    }

    #[test]
    fn test_round_trip() {
        let item = item();
        assert_eq!(
            ShipmentItem::from_record(item.to_record().unwrap()).unwrap(),
            item
        );
    }

    #[test]
    fn test_with_defaults_assigns_identity() {
        let item = ShipmentItem {
            id: None,
            shipment_id: "s#3".to_string(),
            ..item()
        }
        .with_defaults();
        assert!(item.id.is_some_and(|id| !id.is_empty()));
        assert_eq!(item.shipment_id, "3");
    }
}
