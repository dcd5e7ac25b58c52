use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalogue product.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Product {
    /// Product identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Serialize)]
struct ProductLayout {
    pk: String,
    sk: String,
    name: String,
    price: Decimal,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Product {
    /// Primary key of the product row.
    pub fn primary_key(product_id: &str) -> Keys {
        let key = keys::encode_key(product_id, Prefix::Product);
        Keys::table(key.clone(), key)
    }

    /// Fill the identity.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Product)),
            ..self
        }
    }
}

impl Mapper for Product {
    const ENTITY_TYPE: EntityType = EntityType::Product;

    fn to_record(&self) -> Result<Record> {
        let key = super::key(
            super::required(&self.id, Self::ENTITY_TYPE, "id")?,
            Prefix::Product,
            Self::ENTITY_TYPE,
            "id",
        )?;
        let mut record = super::encode(ProductLayout {
            pk: key.clone(),
            sk: key,
            name: self.name.clone(),
            price: self.price,
            entity_type: Self::ENTITY_TYPE,
        })?;
        super::as_numbers(&mut record, &["price"]);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        super::as_strings(&mut record, &["price"]);
        let layout: ProductLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.pk, Prefix::Product)?),
            name: layout.name,
            price: layout.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types::AttributeValue;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_record() {
        let product = Product {
            id: Some("1".to_string()),
            name: "Kettle".to_string(),
            price: dec!(24.90),
        };
        assert_eq!(
            product.to_record().unwrap(),
            Record::from([
                ("pk".to_string(), AttributeValue::S("p#1".to_string())),
                ("sk".to_string(), AttributeValue::S("p#1".to_string())),
                ("name".to_string(), AttributeValue::S("Kettle".to_string())),
                ("price".to_string(), AttributeValue::N("24.90".to_string())),
                (
                    "entityType".to_string(),
                    AttributeValue::S("product".to_string())
                ),
            ])
        );
    }

    #[test]
    fn test_round_trip() {
        let product = Product {
            id: Some("1".to_string()),
            name: "Kettle".to_string(),
            price: dec!(24.90),
        };
        assert_eq!(
            Product::from_record(product.to_record().unwrap()).unwrap(),
            product
        );
    }

    #[test]
    fn test_round_trip_keeps_precision() {
        let product = Product {
            id: Some("1".to_string()),
            name: "Lot".to_string(),
            price: dec!(12345678901234567.8901),
        };
        let record = product.to_record().unwrap();
        assert_eq!(
            record["price"],
            AttributeValue::N("12345678901234567.8901".to_string())
        );
        assert_eq!(Product::from_record(record).unwrap(), product);
    }

    #[test]
    fn test_to_record_rejects_empty_id() {
        let product = Product {
            id: Some("p#".to_string()),
            name: "Kettle".to_string(),
            price: dec!(24.90),
        };
        assert!(matches!(
            product.to_record(),
            Err(crate::error::Error::MissingField { field: "id", .. })
        ));
    }
}
