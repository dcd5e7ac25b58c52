use crate::{
    common::{
        condition::{Condition, KeyCondition},
        key::Key,
    },
    error::Result,
    keys::{self, Prefix},
    model::Invoice,
    read::query::Query,
    store::Store,
};

use std::sync::Arc;

/// Invoices, stored under the order they bill.
#[derive(Clone)]
pub struct InvoiceRepository {
    store: Arc<dyn Store>,
}

impl InvoiceRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace an invoice.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_order_invoice", skip(self), err)
    )]
    pub async fn save_order_invoice(&self, invoice: Invoice) -> Result<Invoice> {
        let invoice = invoice.with_defaults();
        super::put(self.store.as_ref(), &invoice).await?;
        Ok(invoice)
    }

    /// Look up an invoice by its identifier alone.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_invoice_by_id", skip(self), err)
    )]
    pub async fn get_invoice_by_id(&self, invoice_id: &str) -> Result<Option<Invoice>> {
        let invoice_key = keys::encode_key(invoice_id, Prefix::Invoice);
        let query = Query::new(Key::new(keys::GSI1_PK, invoice_key.clone()))
            .index(keys::GSI1)
            .sort_key(KeyCondition::new(
                keys::GSI1_SK,
                Condition::Equals(invoice_key),
            ));
        let invoices: Vec<Invoice> = super::query(self.store.as_ref(), query).await?;
        Ok(invoices.into_iter().next())
    }

    /// The first invoice of an order in key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_invoice_by_order_id", skip(self), err)
    )]
    pub async fn get_invoice_by_order_id(&self, order_id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .get_invoices_by_order_id(order_id)
            .await?
            .into_iter()
            .next())
    }

    /// Every invoice of an order, in key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_invoices_by_order_id", skip(self), err)
    )]
    pub async fn get_invoices_by_order_id(&self, order_id: &str) -> Result<Vec<Invoice>> {
        let query = Query::new(Key::new(
            keys::PK,
            keys::encode_key(order_id, Prefix::Order),
        ))
        .sort_key(KeyCondition::new(
            keys::SK,
            Condition::BeginsWith(Prefix::Invoice.as_str().to_string()),
        ));
        super::query(self.store.as_ref(), query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Error, StoreError},
        model::{Order, Payment},
        repository::{OrderRepository, testing::FailingStore},
        store::MemoryStore,
    };

    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn repository() -> InvoiceRepository {
        InvoiceRepository::new(Arc::new(MemoryStore::new()))
    }

    fn invoice(id: &str, order_id: &str) -> Invoice {
        Invoice {
            id: Some(id.to_string()),
            order_id: order_id.to_string(),
            payments: vec![Payment {
                amount: dec!(5.00),
                date: Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
            }],
            amount: dec!(20.00),
            date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_save_order_invoice_assigns_identity() {
        let repository = repository();
        let saved = repository
            .save_order_invoice(Invoice {
                order_id: "o1".to_string(),
                amount: dec!(12.00),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = saved.id.clone().unwrap();
        assert!(saved.payments.is_empty());
        assert!(saved.date.is_some());
        assert_eq!(repository.get_invoice_by_id(&id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_get_invoice_by_id() {
        let repository = repository();
        repository.save_order_invoice(invoice("i1", "o1")).await.unwrap();
        repository.save_order_invoice(invoice("i2", "o2")).await.unwrap();

        assert_eq!(
            repository.get_invoice_by_id("i2").await.unwrap(),
            Some(invoice("i2", "o2"))
        );
        assert_eq!(repository.get_invoice_by_id("i3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_invoice_by_order_id() {
        let store = Arc::new(MemoryStore::new());
        let repository = InvoiceRepository::new(store.clone());
        OrderRepository::new(store)
            .save_customer_order(Order {
                id: Some("o1".to_string()),
                customer_id: "c1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        repository.save_order_invoice(invoice("i2", "o1")).await.unwrap();
        repository.save_order_invoice(invoice("i1", "o1")).await.unwrap();
        repository.save_order_invoice(invoice("i0", "o2")).await.unwrap();

        assert_eq!(
            repository.get_invoice_by_order_id("o1").await.unwrap(),
            Some(invoice("i1", "o1"))
        );
        assert_eq!(
            repository.get_invoices_by_order_id("o1").await.unwrap(),
            vec![invoice("i1", "o1"), invoice("i2", "o1")]
        );
        assert_eq!(repository.get_invoice_by_order_id("o3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let repository = InvoiceRepository::new(Arc::new(FailingStore));
        assert!(matches!(
            repository.save_order_invoice(invoice("i1", "o1")).await,
            Err(Error::Store(StoreError::Validation(_)))
        ));
    }
}
