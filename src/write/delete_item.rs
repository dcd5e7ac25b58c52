use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
pub(crate) struct DeleteItemInput {
    pub(crate) keys: collections::HashMap<String, types::AttributeValue>,
    pub(crate) write_operation: write::common::WriteInput,
}

/// Delete item request.
///
/// Deleting a key that holds no item succeeds.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_orders::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: common::key::Keys::table("p#1", "p#1"),
///     ..Default::default()
/// };
/// delete_item.send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItem {
    /// Condition the existing item must satisfy for the delete to go through.
    pub condition: Option<common::condition::KeyCondition>,
    /// The primary key of the item to delete.
    pub keys: common::key::Keys,
}

impl From<DeleteItem> for DeleteItemInput {
    fn from(delete_item: DeleteItem) -> Self {
        Self {
            keys: delete_item.keys.into(),
            write_operation: delete_item.condition.into(),
        }
    }
}

impl DeleteItem {
    /// Execute the delete item request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.delete_item", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<(), error::SdkError<operation::delete_item::DeleteItemError>> {
        let delete_item: DeleteItemInput = self.into();
        let builder = client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(delete_item.keys));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty(
        DeleteItem {
            keys: common::key::Keys::table("a", "b"),
            ..Default::default()
        },
        DeleteItemInput {
            keys: collections::HashMap::from(
                [
                    (
                        "pk".to_string(),
                        types::AttributeValue::S(
                            "a".to_string()
                        )
                    ),
                    (
                        "sk".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput::default(),
        }
    )]
    #[case::conditional(
        DeleteItem {
            keys: common::key::Keys {
                partition_key: common::key::Key::new("a", "b"),
                sort_key: None,
            },
            condition: Some(
                common::condition::KeyCondition::new(
                    "a",
                    common::condition::Condition::NotNull,
                )
            ),
        },
        DeleteItemInput {
            keys: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                condition_expression: Some("attribute_exists(#a)".to_string()),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#a".to_string(), "a".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: None,
            },
        }
    )]
    fn test_delete_item(#[case] args: DeleteItem, #[case] expected: DeleteItemInput) {
        let actual: DeleteItemInput = args.into();
        assert_eq!(actual, expected);
    }
}
