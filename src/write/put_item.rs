use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};

/// put item operation
#[derive(Debug, PartialEq)]
pub(crate) struct PutItemInput {
    pub(crate) item: common::Record,
    pub(crate) write_operation: write::common::WriteInput,
}

/// Put item request.
///
/// Replaces any item stored under the same primary key unless a condition says otherwise.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::AttributeValue};
/// use dynamodb_orders::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: common::Record::from([
///         ("pk".to_string(), AttributeValue::S("p#1".to_string())),
///         ("sk".to_string(), AttributeValue::S("p#1".to_string())),
///     ]),
///     condition: None,
/// };
/// put_item.send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem {
    /// Condition the existing item must satisfy for the put to go through.
    pub condition: Option<common::condition::KeyCondition>,
    /// The item to put into the table.
    pub item: common::Record,
}

impl From<PutItem> for PutItemInput {
    fn from(put_item: PutItem) -> Self {
        Self {
            item: put_item.item,
            write_operation: put_item.condition.into(),
        }
    }
}

impl PutItem {
    /// Execute the put item request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.put_item", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<(), error::SdkError<operation::put_item::PutItemError>> {
        let put_item: PutItemInput = self.into();
        let builder = client
            .put_item()
            .table_name(table_name)
            .set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use std::collections;

    #[rstest]
    #[case::empty(
        PutItem {
            item: common::Record::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    ),
                )]
            ),
            condition: None,
        },
        PutItemInput {
            item: common::Record::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    ),
                )]
            ),
            write_operation: write::common::WriteInput::default(),
        }
    )]
    #[case::conditional(
        PutItem {
            item: common::Record::from(
                [(
                    "pk".to_string(),
                    types::AttributeValue::S(
                        "o#1".to_string()
                    ),
                )]
            ),
            condition: Some(
                common::condition::KeyCondition::new(
                    "pk",
                    common::condition::Condition::Null,
                )
            ),
        },
        PutItemInput {
            item: common::Record::from(
                [(
                    "pk".to_string(),
                    types::AttributeValue::S(
                        "o#1".to_string()
                    ),
                )]
            ),
            write_operation: write::common::WriteInput {
                condition_expression: Some("attribute_not_exists(#pk)".to_string()),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#pk".to_string(), "pk".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: None,
            },
        }
    )]
    fn test_put_item(#[case] args: PutItem, #[case] expected: PutItemInput) {
        let actual: PutItemInput = args.into();
        assert_eq!(actual, expected);
    }
}
