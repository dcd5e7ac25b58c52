use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

/// Internal representation of the condition attached to a write.
///
/// Holds the resolved expression string and attribute mappings ready for the
/// DynamoDB API calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) condition_expression: Option<String>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
}

impl From<Option<common::condition::KeyCondition>> for WriteInput {
    fn from(condition: Option<common::condition::KeyCondition>) -> Self {
        match condition {
            Some(condition) => {
                let condition_operation: common::ExpressionInput = condition.into();
                let (condition_expression, expression_attribute_names, expression_attribute_values) =
                    condition_operation.into_parts();
                Self {
                    condition_expression,
                    expression_attribute_names,
                    expression_attribute_values,
                }
            }
            None => Self::default(),
        }
    }
}

/// apply the write condition settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::unconditional(None, WriteInput::default())]
    #[case::attribute_not_exists(
        Some(
            common::condition::KeyCondition::new(
                "pk",
                common::condition::Condition::Null,
            )
        ),
        WriteInput {
            condition_expression: Some("attribute_not_exists(#pk)".to_string()),
            expression_attribute_names: Some(
                collections::HashMap::from(
                    [
                        ("#pk".to_string(), "pk".to_string()),
                    ]
                )
            ),
            expression_attribute_values: None,
        }
    )]
    fn test_write_input(
        #[case] condition: Option<common::condition::KeyCondition>,
        #[case] expected: WriteInput,
    ) {
        let actual: WriteInput = condition.into();
        assert_eq!(actual, expected);
    }
}
