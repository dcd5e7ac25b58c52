use super::Store;
use crate::{
    common::{Record, key::Keys},
    config::TableConfig,
    error::{CancellationReason, Error, Result, StoreError},
    read, write,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, operation::transact_write_items::TransactWriteItemsError};

/// [`Store`] backed by a DynamoDB table.
///
/// ```rust,no_run
/// use dynamodb_orders::{config::TableConfig, store::DynamoStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = DynamoStore::from_config(&TableConfig::from_env()?).await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Bind a client to a table.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS configuration, overridden by `config`.
    pub async fn from_config(config: &TableConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// The table requests are sent to.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn get_item(&self, keys: Keys) -> Result<Option<Record>> {
        let get_item = read::get_item::GetItem {
            keys,
            ..Default::default()
        };
        get_item
            .send(&self.client, &self.table_name)
            .await
            .map_err(|err| StoreError::from(err).into())
    }

    async fn put_item(&self, record: Record) -> Result<()> {
        let put_item = write::put_item::PutItem {
            item: record,
            condition: None,
        };
        put_item
            .send(&self.client, &self.table_name)
            .await
            .map_err(|err| StoreError::from(err).into())
    }

    async fn query(&self, query: read::query::Query) -> Result<Vec<Record>> {
        query
            .send(&self.client, &self.table_name)
            .await
            .map_err(|err| StoreError::from(err).into())
    }

    async fn delete_item(&self, keys: Keys) -> Result<()> {
        let delete_item = write::delete_item::DeleteItem {
            keys,
            ..Default::default()
        };
        delete_item
            .send(&self.client, &self.table_name)
            .await
            .map_err(|err| StoreError::from(err).into())
    }

    async fn scan(&self) -> Result<Vec<Record>> {
        read::scan::Scan::default()
            .send(&self.client, &self.table_name)
            .await
            .map_err(|err| StoreError::from(err).into())
    }

    async fn transact_write_items(
        &self,
        items: Vec<write::transact_write_items::TransactWriteItem>,
    ) -> Result<()> {
        let transaction = write::transact_write_items::TransactWriteItems { items };
        let Err(err) = transaction.send(&self.client, &self.table_name).await else {
            return Ok(());
        };
        if let Some(TransactWriteItemsError::TransactionCanceledException(exception)) =
            err.as_service_error()
        {
            let reasons: Vec<CancellationReason> = exception
                .cancellation_reasons()
                .iter()
                .map(CancellationReason::from)
                .collect();
            #[cfg(feature = "tracing")]
            tracing::error!(?reasons, "transaction cancelled");
            return Err(Error::TransactionCanceled { reasons });
        }
        Err(StoreError::from(err).into())
    }
}
