use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    consistent_read: Option<bool>,
    expression_attribute_names: Option<collections::HashMap<String, String>>,
    expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    index_name: Option<String>,
    key_condition_expression: Option<String>,
    scan_index_forward: Option<bool>,
}

/// Query request.
///
/// Matches every item whose partition key equals `partition_key` and, when given,
/// whose sort key satisfies `sort_key_condition`. Results come back in sort key order.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_orders::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query = read::query::Query::new(common::key::Key::new("pk", "o#1")).sort_key(
///     common::condition::KeyCondition::new(
///         "sk",
///         common::condition::Condition::BeginsWith("p#".to_string()),
///     ),
/// );
/// let items = query.send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    /// Whether to use a strongly consistent read (not supported on global indexes).
    pub consistent_read: Option<bool>,
    /// The global secondary index to query instead of the table.
    pub index_name: Option<String>,
    /// The partition key value to query for.
    pub partition_key: common::key::Key,
    /// Whether to scan the index forward (ascending) or backward (descending).
    pub scan_index_forward: Option<bool>,
    /// Optional condition to apply to the sort key.
    pub sort_key_condition: Option<common::condition::KeyCondition>,
}

impl Query {
    /// Query the items sharing a partition key.
    pub fn new(partition_key: common::key::Key) -> Self {
        Self {
            partition_key,
            ..Default::default()
        }
    }

    /// Run against a global secondary index.
    pub fn index(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Restrict the sort key.
    pub fn sort_key(mut self, sort_key_condition: common::condition::KeyCondition) -> Self {
        self.sort_key_condition = Some(sort_key_condition);
        self
    }

    fn get_key_condition_expression(
        partition_key: common::key::Key,
        sort_key: Option<common::condition::KeyCondition>,
    ) -> common::ExpressionInput {
        let condition = common::condition::Condition::Equals(partition_key.value);
        let partition_key = common::condition::KeyCondition {
            condition,
            name: partition_key.name,
        };
        let mut keys = vec![partition_key];
        if let Some(sort_key) = sort_key {
            keys.push(sort_key);
        }
        common::condition::KeyCondition::get_expression_operation(keys)
    }
}

impl From<Query> for QueryInput {
    fn from(query: Query) -> Self {
        let (key_condition_expression, expression_attribute_names, expression_attribute_values) =
            Query::get_key_condition_expression(query.partition_key, query.sort_key_condition)
                .into_parts();
        Self {
            consistent_read: query.consistent_read,
            expression_attribute_names,
            expression_attribute_values,
            index_name: query.index_name,
            key_condition_expression,
            scan_index_forward: query.scan_index_forward,
        }
    }
}

impl Query {
    /// Execute the query, following pagination until every page has been read.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.query", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<Vec<common::Record>, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.into();
        let mut paginator = client
            .query()
            .table_name(table_name)
            .set_consistent_read(query.consistent_read)
            .set_expression_attribute_names(query.expression_attribute_names)
            .set_expression_attribute_values(query.expression_attribute_values)
            .set_index_name(query.index_name)
            .set_key_condition_expression(query.key_condition_expression)
            .set_scan_index_forward(query.scan_index_forward)
            .into_paginator()
            .send();
        crate::collect_paginated_items!(paginator)
    }
}
