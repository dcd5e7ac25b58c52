use crate::{error::Result, model::Customer, store::Store};

use std::sync::Arc;

/// Customers.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<dyn Store>,
}

impl CustomerRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace a customer.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_customer", skip(self), err)
    )]
    pub async fn save_customer(&self, customer: Customer) -> Result<Customer> {
        let customer = customer.with_defaults();
        super::put(self.store.as_ref(), &customer).await?;
        Ok(customer)
    }

    /// Look up a customer.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_customer_by_id", skip(self), err)
    )]
    pub async fn get_customer_by_id(&self, customer_id: &str) -> Result<Option<Customer>> {
        super::get(self.store.as_ref(), Customer::primary_key(customer_id)).await
    }

    /// Remove a customer. Their orders are left in place.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.delete_customer", skip(self), err)
    )]
    pub async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        self.store
            .delete_item(Customer::primary_key(customer_id))
            .await
    }
}
