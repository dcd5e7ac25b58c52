use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use serde::{Deserialize, Serialize};

/// A warehouse shipments leave from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Warehouse {
    /// Warehouse identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct WarehouseLayout {
    pk: String,
    sk: String,
    name: String,
    address: String,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Warehouse {
    /// Primary key of the warehouse row.
    pub fn primary_key(warehouse_id: &str) -> Keys {
        let key = keys::encode_key(warehouse_id, Prefix::Warehouse);
        Keys::table(key.clone(), key)
    }

    /// Fill the identity.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Warehouse)),
            ..self
        }
    }
}

impl Mapper for Warehouse {
    const ENTITY_TYPE: EntityType = EntityType::Warehouse;

    fn to_record(&self) -> Result<Record> {
        let key = super::key(
            super::required(&self.id, Self::ENTITY_TYPE, "id")?,
            Prefix::Warehouse,
            Self::ENTITY_TYPE,
            "id",
        )?;
        super::encode(WarehouseLayout {
            pk: key.clone(),
            sk: key,
            name: self.name.clone(),
            address: self.address.clone(),
            entity_type: Self::ENTITY_TYPE,
        })
    }

    fn from_record(record: Record) -> Result<Self> {
        let layout: WarehouseLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.pk, Prefix::Warehouse)?),
            name: layout.name,
            address: layout.address,
        })
    }
}
