use crate::write;

use aws_sdk_dynamodb::{Client, error, operation, types};

/// A single request within a transactional write.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactWriteItem {
    /// Put item request - creates or replaces an item.
    Put(write::put_item::PutItem),
    /// Delete item request - removes an item by its primary key.
    Delete(write::delete_item::DeleteItem),
}

impl TransactWriteItem {
    fn into_request(
        self,
        table_name: &str,
    ) -> Result<types::TransactWriteItem, error::BuildError> {
        let builder = types::TransactWriteItem::builder();
        let builder = match self {
            Self::Put(put_item) => {
                let put_item: write::put_item::PutItemInput = put_item.into();
                let put = types::Put::builder()
                    .table_name(table_name)
                    .set_item(Some(put_item.item));
                let put = crate::apply_write_operation!(put, put_item.write_operation).build()?;
                builder.put(put)
            }
            Self::Delete(delete_item) => {
                let delete_item: write::delete_item::DeleteItemInput = delete_item.into();
                let delete = types::Delete::builder()
                    .table_name(table_name)
                    .set_key(Some(delete_item.keys));
                let delete =
                    crate::apply_write_operation!(delete, delete_item.write_operation).build()?;
                builder.delete(delete)
            }
        };
        Ok(builder.build())
    }
}

/// Transactional write request.
///
/// Either every item is written or none is. A rejected transaction fails with a
/// `TransactionCanceledException` listing one reason per item, in request order.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_orders::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let transaction = write::transact_write_items::TransactWriteItems {
///     items: vec![
///         write::transact_write_items::TransactWriteItem::Delete(
///             write::delete_item::DeleteItem {
///                 keys: common::key::Keys::table("p#1", "p#1"),
///                 ..Default::default()
///             },
///         ),
///     ],
/// };
/// transaction.send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactWriteItems {
    /// The writes to apply together.
    pub items: Vec<TransactWriteItem>,
}

impl TransactWriteItems {
    fn into_requests(
        self,
        table_name: &str,
    ) -> Result<Vec<types::TransactWriteItem>, error::BuildError> {
        self.items
            .into_iter()
            .map(|item| item.into_request(table_name))
            .collect()
    }

    /// Execute the transactional write.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.transact_write_items", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<(), error::SdkError<operation::transact_write_items::TransactWriteItemsError>> {
        let items = self.into_requests(table_name)?;
        client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common;

    use std::collections;

    #[test]
    fn test_transact_write_items() {
        let transaction = TransactWriteItems {
            items: vec![
                TransactWriteItem::Put(write::put_item::PutItem {
                    item: common::Record::from([(
                        "pk".to_string(),
                        types::AttributeValue::S("o#1".to_string()),
                    )]),
                    condition: Some(common::condition::KeyCondition::new(
                        "pk",
                        common::condition::Condition::Null,
                    )),
                }),
                TransactWriteItem::Delete(write::delete_item::DeleteItem {
                    keys: common::key::Keys::table("o#1", "p#2"),
                    ..Default::default()
                }),
            ],
        };
        let expected = vec![
            types::TransactWriteItem::builder()
                .put(
                    types::Put::builder()
                        .table_name("orders")
                        .set_item(Some(collections::HashMap::from([(
                            "pk".to_string(),
                            types::AttributeValue::S("o#1".to_string()),
                        )])))
                        .condition_expression("attribute_not_exists(#pk)")
                        .expression_attribute_names("#pk", "pk")
                        .build()
                        .unwrap(),
                )
                .build(),
            types::TransactWriteItem::builder()
                .delete(
                    types::Delete::builder()
                        .table_name("orders")
                        .set_key(Some(collections::HashMap::from([
                            (
                                "pk".to_string(),
                                types::AttributeValue::S("o#1".to_string()),
                            ),
                            (
                                "sk".to_string(),
                                types::AttributeValue::S("p#2".to_string()),
                            ),
                        ])))
                        .build()
                        .unwrap(),
                )
                .build(),
        ];
        let actual = transaction.into_requests("orders").unwrap();
        assert_eq!(actual, expected);
    }
}
