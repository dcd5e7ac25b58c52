use super::Store;
use crate::{
    common::{
        Record,
        condition::{Condition, KeyCondition},
        key::Keys,
    },
    error::{CancellationReason, Error, Result, StoreError},
    keys,
    read::query::Query,
    write::transact_write_items::TransactWriteItem,
};

use async_trait::async_trait;
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use tokio::sync::RwLock;

type PrimaryKey = (String, String);

/// In-process [`Store`] emulating the single table.
///
/// Rows are unique on (`pk`, `sk`). The `gsi1` and `gsi2` indexes are sparse: a row
/// shows up in an index only when it carries both of that index's key attributes.
/// Queries return rows in ascending byte order of the sort key, ties broken by
/// primary key. Nothing is persisted; clones share the same rows.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<BTreeMap<PrimaryKey, Record>>>,
}

impl MemoryStore {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn attribute<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record.get(name)?.as_s().ok().map(String::as_str)
}

fn record_key(record: &Record) -> Result<PrimaryKey> {
    Keys::of_record(record)
        .and_then(table_key)
        .ok_or_else(|| validation("record is missing its `pk`/`sk` string attributes"))
}

fn table_key(keys: Keys) -> Option<PrimaryKey> {
    let sort_key = keys.sort_key?;
    (keys.partition_key.name == keys::PK && sort_key.name == keys::SK)
        .then_some((keys.partition_key.value, sort_key.value))
}

fn requested_key(keys: Keys) -> Result<PrimaryKey> {
    table_key(keys).ok_or_else(|| validation("key must name exactly `pk` and `sk`"))
}

fn index_attributes(index_name: Option<&str>) -> Result<(&'static str, &'static str)> {
    match index_name {
        None => Ok((keys::PK, keys::SK)),
        Some(keys::GSI1) => Ok((keys::GSI1_PK, keys::GSI1_SK)),
        Some(keys::GSI2) => Ok((keys::GSI2_PK, keys::GSI2_SK)),
        Some(index_name) => Err(validation(format!("unknown index `{index_name}`"))),
    }
}

fn condition_holds(condition: Option<&KeyCondition>, existing: Option<&Record>) -> bool {
    condition.is_none_or(|condition| {
        condition
            .condition
            .matches(existing.and_then(|record| attribute(record, &condition.name)))
    })
}

fn validation(message: impl Into<String>) -> Error {
    StoreError::Validation(message.into()).into()
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_item(&self, keys: Keys) -> Result<Option<Record>> {
        let key = requested_key(keys)?;
        Ok(self.rows.read().await.get(&key).cloned())
    }

    async fn put_item(&self, record: Record) -> Result<()> {
        let key = record_key(&record)?;
        self.rows.write().await.insert(key, record);
        Ok(())
    }

    async fn query(&self, query: Query) -> Result<Vec<Record>> {
        let (partition_key_name, sort_key_name) = index_attributes(query.index_name.as_deref())?;
        if query.partition_key.name != partition_key_name {
            return Err(validation(format!(
                "query must name the partition key `{partition_key_name}`"
            )));
        }
        if query
            .sort_key_condition
            .as_ref()
            .is_some_and(|condition| condition.name != sort_key_name)
        {
            return Err(validation(format!(
                "query must name the sort key `{sort_key_name}`"
            )));
        }
        if query.sort_key_condition.as_ref().is_some_and(|condition| {
            matches!(&condition.condition, Condition::Between(low, high) if low > high)
        }) {
            return Err(validation(
                "BETWEEN lower bound must not exceed the upper bound",
            ));
        }
        if query.index_name.is_some() && query.consistent_read == Some(true) {
            return Err(validation("consistent reads are not supported on global indexes"));
        }

        let rows = self.rows.read().await;
        let mut matched: Vec<(&str, &PrimaryKey, &Record)> = rows
            .iter()
            .filter_map(|(key, record)| {
                let partition_key = attribute(record, partition_key_name)?;
                let sort_key = attribute(record, sort_key_name)?;
                let selected = partition_key == query.partition_key.value
                    && query
                        .sort_key_condition
                        .as_ref()
                        .is_none_or(|condition| condition.condition.matches(Some(sort_key)));
                selected.then_some((sort_key, key, record))
            })
            .collect();
        matched.sort_by(|(a_sort, a_key, _), (b_sort, b_key, _)| {
            a_sort.cmp(b_sort).then_with(|| a_key.cmp(b_key))
        });
        if query.scan_index_forward == Some(false) {
            matched.reverse();
        }
        Ok(matched
            .into_iter()
            .map(|(_, _, record)| record.clone())
            .collect())
    }

    async fn delete_item(&self, keys: Keys) -> Result<()> {
        let key = requested_key(keys)?;
        self.rows.write().await.remove(&key);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Record>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn transact_write_items(&self, items: Vec<TransactWriteItem>) -> Result<()> {
        let mut targets = Vec::with_capacity(items.len());
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let key = match item {
                TransactWriteItem::Put(put_item) => record_key(&put_item.item)?,
                TransactWriteItem::Delete(delete_item) => requested_key(delete_item.keys.clone())?,
            };
            if !seen.insert(key.clone()) {
                return Err(validation(
                    "transaction cannot include multiple operations on one item",
                ));
            }
            targets.push(key);
        }

        let mut rows = self.rows.write().await;
        let reasons: Vec<CancellationReason> = items
            .iter()
            .zip(&targets)
            .map(|(item, key)| {
                let condition = match item {
                    TransactWriteItem::Put(put_item) => put_item.condition.as_ref(),
                    TransactWriteItem::Delete(delete_item) => delete_item.condition.as_ref(),
                };
                let code = if condition_holds(condition, rows.get(key)) {
                    "None"
                } else {
                    "ConditionalCheckFailed"
                };
                CancellationReason {
                    code: Some(code.to_string()),
                    ..Default::default()
                }
            })
            .collect();
        if reasons.iter().any(CancellationReason::is_failure) {
            #[cfg(feature = "tracing")]
            tracing::error!(?reasons, "transaction cancelled");
            return Err(Error::TransactionCanceled { reasons });
        }

        for (item, key) in items.into_iter().zip(targets) {
            match item {
                TransactWriteItem::Put(put_item) => {
                    rows.insert(key, put_item.item);
                }
                TransactWriteItem::Delete(_) => {
                    rows.remove(&key);
                }
            }
        }
        Ok(())
    }
}
