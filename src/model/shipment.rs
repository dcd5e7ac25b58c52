use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shipment sent from a warehouse for an order.
///
/// Reachable by id through `gsi1` and by warehouse through `gsi2`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shipment {
    /// Shipment identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// The order shipped.
    pub order_id: String,
    /// The warehouse the shipment leaves from.
    pub warehouse_id: String,
    /// Shipping date, defaults to the time of the save.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ShipmentLayout {
    pk: String,
    sk: String,
    gsi1_pk: String,
    gsi1_sk: String,
    gsi2_pk: String,
    gsi2_sk: String,
    date: String,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Shipment {
    /// Primary key of the shipment row.
    pub fn primary_key(order_id: &str, shipment_id: &str) -> Keys {
        Keys::table(
            keys::encode_key(order_id, Prefix::Order),
            keys::encode_key(shipment_id, Prefix::Shipment),
        )
    }

    /// Fill the identity and the date, normalising identifiers.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Shipment)),
            order_id: keys::strip_prefix(&self.order_id, Prefix::Order).to_string(),
            warehouse_id: keys::strip_prefix(&self.warehouse_id, Prefix::Warehouse).to_string(),
            date: Some(keys::truncate_timestamp(self.date.unwrap_or_else(Utc::now))),
        }
    }
}

impl Mapper for Shipment {
    const ENTITY_TYPE: EntityType = EntityType::Shipment;

    fn to_record(&self) -> Result<Record> {
        let id = super::required(&self.id, Self::ENTITY_TYPE, "id")?;
        let date = super::required(&self.date, Self::ENTITY_TYPE, "date")?;
        let shipment_key = super::key(id, Prefix::Shipment, Self::ENTITY_TYPE, "id")?;
        super::encode(ShipmentLayout {
            pk: super::key(&self.order_id, Prefix::Order, Self::ENTITY_TYPE, "order_id")?,
            sk: shipment_key.clone(),
            gsi1_pk: shipment_key.clone(),
            gsi1_sk: shipment_key.clone(),
            gsi2_pk: super::key(
                &self.warehouse_id,
                Prefix::Warehouse,
                Self::ENTITY_TYPE,
                "warehouse_id",
            )?,
            gsi2_sk: shipment_key,
            date: keys::encode_timestamp(date),
            entity_type: Self::ENTITY_TYPE,
        })
    }

    fn from_record(record: Record) -> Result<Self> {
        let layout: ShipmentLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.sk, Prefix::Shipment)?),
            order_id: keys::decode_key(&layout.pk, Prefix::Order)?,
            warehouse_id: keys::decode_key(&layout.gsi2_pk, Prefix::Warehouse)?,
            date: Some(keys::decode_timestamp(&layout.date)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::TimeZone;

    fn shipment() -> Shipment {
        Shipment {
            id: Some("5".to_string()),
            order_id: "1".to_string(),
            warehouse_id: "2".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 3, 4, 8, 15, 0).unwrap()),
        }
    }

    #[test]
    fn test_to_record() {
        let record = shipment().to_record().unwrap();
        let shipment_key = AttributeValue::S("s#5".to_string());
        assert_eq!(record["pk"], AttributeValue::S("o#1".to_string()));
        assert_eq!(record["sk"], shipment_key);
        assert_eq!(record["gsi1_pk"], shipment_key);
        assert_eq!(record["gsi1_sk"], shipment_key);
        assert_eq!(record["gsi2_pk"], AttributeValue::S("w#2".to_string()));
        assert_eq!(record["gsi2_sk"], shipment_key);
        assert_eq!(
            record["entityType"],
            AttributeValue::S("shipment".to_string())
        );
    }

    #[test]
    fn test_round_trip() {
        let shipment = shipment();
        assert_eq!(
            Shipment::from_record(shipment.to_record().unwrap()).unwrap(),
            shipment
        );
    }

    #[test]
    fn test_with_defaults_truncates_date() {
        let date = Utc.timestamp_nanos(1_709_539_200_123_456_789);
        let shipment = Shipment {
            date: Some(date),
            ..shipment()
        }
        .with_defaults();
        assert_eq!(
            shipment.date.map(|date| keys::encode_timestamp(&date)),
            Some("2024-03-04T08:00:00.123Z".to_string())
        );
        assert_eq!(shipment.id.as_deref(), Some("5"));
    }
}
