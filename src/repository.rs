//! Repositories over the single table.
//!
//! Every repository shares a [`Store`] and is stateless otherwise. Saves fill in
//! defaults and issue one unconditional put, so the last writer wins. Lookups by
//! identity return `Ok(None)` when nothing is stored; queries return the matches in
//! key order. Store failures are returned as they are, without retries.

/// Customer records.
pub mod customer;
/// Invoices and their payments.
pub mod invoice;
/// Orders, order items and shipment items.
pub mod order;
/// Catalogue products.
pub mod product;
/// Shipments.
pub mod shipment;
/// Warehouses.
pub mod warehouse;

pub use customer::CustomerRepository;
pub use invoice::InvoiceRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use shipment::ShipmentRepository;
pub use warehouse::WarehouseRepository;

use crate::{
    common::key::Keys, error::Result, model::Mapper, read::query::Query, store::Store,
};

async fn put<T: Mapper>(store: &dyn Store, entity: &T) -> Result<()> {
    store.put_item(entity.to_record()?).await
}

async fn get<T: Mapper>(store: &dyn Store, keys: Keys) -> Result<Option<T>> {
    store.get_item(keys).await?.map(T::from_record).transpose()
}

async fn query<T: Mapper>(store: &dyn Store, query: Query) -> Result<Vec<T>> {
    store
        .query(query)
        .await?
        .into_iter()
        .map(T::from_record)
        .collect()
}
