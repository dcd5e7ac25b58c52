use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use serde::{Deserialize, Serialize};

/// A customer placing orders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Customer {
    /// Customer identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// Full name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct CustomerLayout {
    pk: String,
    sk: String,
    name: String,
    email: String,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Customer {
    /// Primary key of the customer row.
    pub fn primary_key(customer_id: &str) -> Keys {
        let key = keys::encode_key(customer_id, Prefix::Customer);
        Keys::table(key.clone(), key)
    }

    /// Fill the identity.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Customer)),
            ..self
        }
    }
}

impl Mapper for Customer {
    const ENTITY_TYPE: EntityType = EntityType::Customer;

    fn to_record(&self) -> Result<Record> {
        let key = super::key(
            super::required(&self.id, Self::ENTITY_TYPE, "id")?,
            Prefix::Customer,
            Self::ENTITY_TYPE,
            "id",
        )?;
        super::encode(CustomerLayout {
            pk: key.clone(),
            sk: key,
            name: self.name.clone(),
            email: self.email.clone(),
            entity_type: Self::ENTITY_TYPE,
        })
    }

    fn from_record(record: Record) -> Result<Self> {
        let layout: CustomerLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.pk, Prefix::Customer)?),
            name: layout.name,
            email: layout.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    use aws_sdk_dynamodb::types::AttributeValue;
    use rstest::rstest;

    fn customer() -> Customer {
        Customer {
            id: Some("1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let customer = customer();
        assert_eq!(
            Customer::from_record(customer.to_record().unwrap()).unwrap(),
            customer
        );
    }

    #[rstest]
    #[case::product_prefix("p#1")]
    #[case::no_prefix("1")]
    #[case::empty_identifier("c#")]
    fn test_from_record_malformed_key(#[case] pk: &str) {
        let mut record = customer().to_record().unwrap();
        record.insert("pk".to_string(), AttributeValue::S(pk.to_string()));
        assert!(matches!(
            Customer::from_record(record),
            Err(Error::MalformedKey { expected: "c#", .. })
        ));
    }

    #[test]
    fn test_from_record_missing_attribute() {
        let mut record = customer().to_record().unwrap();
        record.remove("email");
        assert!(matches!(
            Customer::from_record(record),
            Err(Error::Serialization(_))
        ));
    }
}
