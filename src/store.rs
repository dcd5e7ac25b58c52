//! Storage backends the repositories run against.
//!
//! [`Store`] is the narrow set of table operations the repositories need. The table
//! name is bound into each backend at construction.

/// Backend talking to Amazon DynamoDB.
pub mod dynamo;

/// In-process backend emulating the table and its indexes.
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use crate::{
    common::{Record, key::Keys},
    error::Result,
    read::query::Query,
    write::transact_write_items::TransactWriteItem,
};

use async_trait::async_trait;

/// Table operations consumed by the repositories.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read one record by primary key, `None` when absent.
    async fn get_item(&self, keys: Keys) -> Result<Option<Record>>;

    /// Create or fully replace the record under its primary key.
    async fn put_item(&self, record: Record) -> Result<()>;

    /// Run a key-condition query, draining every page.
    async fn query(&self, query: Query) -> Result<Vec<Record>>;

    /// Remove the record under the primary key. Absent records are not an error.
    async fn delete_item(&self, keys: Keys) -> Result<()>;

    /// Read every record of the table.
    async fn scan(&self) -> Result<Vec<Record>>;

    /// Apply every write or none of them.
    async fn transact_write_items(&self, items: Vec<TransactWriteItem>) -> Result<()>;
}

/// Delete every record of the table.
///
/// The deletes run concurrently; the first failure is returned and deletes that
/// already went through stay applied.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_orders.truncate_table", skip(store), err)
)]
pub async fn truncate_table(store: &dyn Store) -> Result<usize> {
    let keys: Vec<Keys> = store.scan().await?.iter().filter_map(Keys::of_record).collect();
    let deleted = keys.len();
    futures::future::try_join_all(keys.into_iter().map(|keys| store.delete_item(keys))).await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types::AttributeValue;

    fn record(pk: &str, sk: &str) -> Record {
        Record::from([
            ("pk".to_string(), AttributeValue::S(pk.to_string())),
            ("sk".to_string(), AttributeValue::S(sk.to_string())),
        ])
    }

    #[tokio::test]
    async fn test_truncate_table() {
        let store = MemoryStore::new();
        store.put_item(record("p#1", "p#1")).await.unwrap();
        store.put_item(record("o#1", "c#1")).await.unwrap();
        store.put_item(record("o#1", "p#1")).await.unwrap();

        assert_eq!(truncate_table(&store).await.unwrap(), 3);
        assert!(store.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_truncate_empty_table() {
        let store = MemoryStore::new();
        assert_eq!(truncate_table(&store).await.unwrap(), 0);
    }
}
