use crate::{error::Result, model::Product, store::Store};

use std::sync::Arc;

/// Catalogue products.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn Store>,
}

impl ProductRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace a product.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_product", skip(self), err)
    )]
    pub async fn save_product(&self, product: Product) -> Result<Product> {
        let product = product.with_defaults();
        super::put(self.store.as_ref(), &product).await?;
        Ok(product)
    }

    /// Look up a product.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_product_by_id", skip(self), err)
    )]
    pub async fn get_product_by_id(&self, product_id: &str) -> Result<Option<Product>> {
        super::get(self.store.as_ref(), Product::primary_key(product_id)).await
    }

    /// Remove a product. Order items referencing it are left in place.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.delete_product", skip(self), err)
    )]
    pub async fn delete_product(&self, product_id: &str) -> Result<()> {
        self.store
            .delete_item(Product::primary_key(product_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Error, StoreError},
        repository::testing::FailingStore,
        store::MemoryStore,
    };

    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn repository() -> ProductRepository {
        ProductRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_save_product_assigns_identity() {
        let repository = repository();
        let saved = repository
            .save_product(Product {
                name: "Kettle".to_string(),
                price: dec!(24.90),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = saved.id.clone().unwrap();
        assert!(!id.is_empty());
        assert_eq!(repository.get_product_by_id(&id).await.unwrap(), Some(saved));
    }

    #[rstest]
    #[case::raw("p1")]
    #[case::prefixed("p#p1")]
    #[tokio::test]
    async fn test_save_product_overwrites(#[case] lookup: &str) {
        let repository = repository();
        for price in [dec!(1.00), dec!(2.00)] {
            repository
                .save_product(Product {
                    id: Some("p1".to_string()),
                    name: "Mug".to_string(),
                    price,
                })
                .await
                .unwrap();
        }
        let product = repository.get_product_by_id(lookup).await.unwrap().unwrap();
        assert_eq!(product.price, dec!(2.00));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let repository = repository();
        repository
            .save_product(Product {
                id: Some("p1".to_string()),
                name: "Mug".to_string(),
                price: dec!(3.00),
            })
            .await
            .unwrap();
        repository.delete_product("p1").await.unwrap();
        assert_eq!(repository.get_product_by_id("p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let repository = ProductRepository::new(Arc::new(FailingStore));
        assert!(matches!(
            repository.delete_product("p1").await,
            Err(Error::Store(StoreError::Validation(_)))
        ));
    }
}
