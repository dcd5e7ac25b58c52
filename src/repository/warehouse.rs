use crate::{error::Result, model::Warehouse, store::Store};

use std::sync::Arc;

/// Warehouses.
#[derive(Clone)]
pub struct WarehouseRepository {
    store: Arc<dyn Store>,
}

impl WarehouseRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace a warehouse.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_warehouse", skip(self), err)
    )]
    pub async fn save_warehouse(&self, warehouse: Warehouse) -> Result<Warehouse> {
        let warehouse = warehouse.with_defaults();
        super::put(self.store.as_ref(), &warehouse).await?;
        Ok(warehouse)
    }

    /// Look up a warehouse.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_warehouse_by_id", skip(self), err)
    )]
    pub async fn get_warehouse_by_id(&self, warehouse_id: &str) -> Result<Option<Warehouse>> {
        super::get(self.store.as_ref(), Warehouse::primary_key(warehouse_id)).await
    }
}
