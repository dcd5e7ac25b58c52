use crate::{
    common::{
        condition::{Condition, KeyCondition},
        key::Key,
    },
    error::Result,
    keys::{self, Prefix},
    model::Shipment,
    read::query::Query,
    store::Store,
};

use std::sync::Arc;

/// Shipments, stored under their order and indexed by id and by warehouse.
#[derive(Clone)]
pub struct ShipmentRepository {
    store: Arc<dyn Store>,
}

impl ShipmentRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace a shipment.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_order_shipment", skip(self), err)
    )]
    pub async fn save_order_shipment(&self, shipment: Shipment) -> Result<Shipment> {
        let shipment = shipment.with_defaults();
        super::put(self.store.as_ref(), &shipment).await?;
        Ok(shipment)
    }

    /// Look up a shipment by its identifier alone.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_shipment_by_shipment_id", skip(self), err)
    )]
    pub async fn get_shipment_by_shipment_id(&self, shipment_id: &str) -> Result<Option<Shipment>> {
        let shipment_key = keys::encode_key(shipment_id, Prefix::Shipment);
        let query = Query::new(Key::new(keys::GSI1_PK, shipment_key.clone()))
            .index(keys::GSI1)
            .sort_key(KeyCondition::new(
                keys::GSI1_SK,
                Condition::Equals(shipment_key),
            ));
        let shipments: Vec<Shipment> = super::query(self.store.as_ref(), query).await?;
        Ok(shipments.into_iter().next())
    }

    /// Shipments of an order, in key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_shipments_by_order_id", skip(self), err)
    )]
    pub async fn get_shipments_by_order_id(&self, order_id: &str) -> Result<Vec<Shipment>> {
        let query = Query::new(Key::new(
            keys::PK,
            keys::encode_key(order_id, Prefix::Order),
        ))
        .sort_key(KeyCondition::new(
            keys::SK,
            Condition::BeginsWith(Prefix::Shipment.as_str().to_string()),
        ));
        super::query(self.store.as_ref(), query).await
    }

    /// Shipments leaving a warehouse, in shipment key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_shipments_by_warehouse_id", skip(self), err)
    )]
    pub async fn get_shipments_by_warehouse_id(
        &self,
        warehouse_id: &str,
    ) -> Result<Vec<Shipment>> {
        let query = Query::new(Key::new(
            keys::GSI2_PK,
            keys::encode_key(warehouse_id, Prefix::Warehouse),
        ))
        .index(keys::GSI2);
        super::query(self.store.as_ref(), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ShipmentItem, Warehouse},
        repository::{OrderRepository, WarehouseRepository},
        store::MemoryStore,
    };

    use chrono::{TimeZone, Utc};

    fn shipment(id: &str, order_id: &str, warehouse_id: &str) -> Shipment {
        Shipment {
            id: Some(id.to_string()),
            order_id: order_id.to_string(),
            warehouse_id: warehouse_id.to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_save_order_shipment_assigns_identity() {
        let repository = ShipmentRepository::new(Arc::new(MemoryStore::new()));
        let saved = repository
            .save_order_shipment(Shipment {
                order_id: "o#o1".to_string(),
                warehouse_id: "w#w1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(saved.order_id, "o1");
        assert_eq!(saved.warehouse_id, "w1");
        let id = saved.id.clone().unwrap();
        assert_eq!(
            repository.get_shipment_by_shipment_id(&id).await.unwrap(),
            Some(saved)
        );
        assert_eq!(
            repository.get_shipment_by_shipment_id("missing").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_get_shipments_by_order_id() {
        let store = Arc::new(MemoryStore::new());
        let repository = ShipmentRepository::new(store.clone());
        repository.save_order_shipment(shipment("s2", "o1", "w1")).await.unwrap();
        repository.save_order_shipment(shipment("s1", "o1", "w2")).await.unwrap();
        repository.save_order_shipment(shipment("s3", "o2", "w1")).await.unwrap();
        OrderRepository::new(store)
            .save_order_shipment_item(ShipmentItem {
                id: Some("d1".to_string()),
                order_id: "o1".to_string(),
                product_id: "p1".to_string(),
                shipment_id: "s1".to_string(),
                quantity: 1,
            })
            .await
            .unwrap();

        assert_eq!(
            repository.get_shipments_by_order_id("o1").await.unwrap(),
            vec![shipment("s1", "o1", "w2"), shipment("s2", "o1", "w1")]
        );
    }

    #[tokio::test]
    async fn test_get_shipments_by_warehouse_id() {
        let store = Arc::new(MemoryStore::new());
        let repository = ShipmentRepository::new(store.clone());
        WarehouseRepository::new(store)
            .save_warehouse(Warehouse {
                id: Some("w1".to_string()),
                name: "North".to_string(),
                address: "1 Dock Road".to_string(),
            })
            .await
            .unwrap();
        repository.save_order_shipment(shipment("s2", "o1", "w1")).await.unwrap();
        repository.save_order_shipment(shipment("s1", "o2", "w1")).await.unwrap();
        repository.save_order_shipment(shipment("s3", "o1", "w2")).await.unwrap();

        assert_eq!(
            repository.get_shipments_by_warehouse_id("w1").await.unwrap(),
            vec![shipment("s1", "o2", "w1"), shipment("s2", "o1", "w1")]
        );
        assert!(
            repository
                .get_shipments_by_warehouse_id("w9")
                .await
                .unwrap()
                .is_empty()
        );
    }
}
