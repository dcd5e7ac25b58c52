use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    consistent_read: Option<bool>,
    keys: collections::HashMap<String, types::AttributeValue>,
}

/// Get item request.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_orders::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys::table("p#1", "p#1"),
///     ..Default::default()
/// };
/// let item = get_item.send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys,
}

impl From<GetItem> for GetItemInput {
    fn from(get_item: GetItem) -> Self {
        Self {
            consistent_read: get_item.consistent_read,
            keys: get_item.keys.into(),
        }
    }
}

impl GetItem {
    /// Execute the get item request, returning the item when it exists.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_item", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<Option<common::Record>, error::SdkError<operation::get_item::GetItemError>> {
        let get_item: GetItemInput = self.into();
        let output = client
            .get_item()
            .table_name(table_name)
            .set_key(Some(get_item.keys))
            .set_consistent_read(get_item.consistent_read)
            .send()
            .await?;
        Ok(output.item)
    }
}
