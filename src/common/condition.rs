use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

const AND: &str = " AND ";

/// Condition types for key conditions and conditional writes.
///
/// Values are compared as strings: every key of the single table is a string attribute.
///
/// ```rust
/// use dynamodb_orders::common::condition;
///
/// let prefix = condition::Condition::BeginsWith("p#".to_string());
/// let window = condition::Condition::Between("2024-01-01".to_string(), "2024-02-01".to_string());
/// let absent = condition::Condition::Null;
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Condition {
    /// Checks if an attribute begins with a specified prefix.
    BeginsWith(String),
    /// Checks if an attribute value is between two values (inclusive).
    Between(String, String),
    /// Checks if an attribute value equals a specified value.
    Equals(String),
    /// Checks if an attribute value is greater than a specified value.
    GreaterThan(String),
    /// Checks if an attribute value is greater than or equal to a specified value.
    GreaterThanOrEqual(String),
    /// Checks if an attribute value is less than a specified value.
    LessThan(String),
    /// Checks if an attribute value is less than or equal to a specified value.
    LessThanOrEqual(String),
    /// Checks if an attribute exists.
    NotNull,
    /// Checks if an attribute does not exist.
    Null,
}

impl Condition {
    fn get_expression(
        self,
        key: &str,
        key_placeholder: &str,
        index: &mut usize,
    ) -> (String, collections::HashMap<String, types::AttributeValue>) {
        let mut expression_attribute_values = collections::HashMap::new();
        let expression = match self {
            Self::BeginsWith(prefix) => {
                let value_placeholder = format!(":{}_begins_with{}", key, index);
                *index += 1;
                let expression = format!("begins_with({}, {})", key_placeholder, value_placeholder);
                expression_attribute_values
                    .insert(value_placeholder, types::AttributeValue::S(prefix));
                expression
            }
            Self::Between(value1, value2) => {
                let value_placeholder_1 = format!(":{}_between{}", key, index);
                *index += 1;
                let value_placeholder_2 = format!(":{}_between{}", key, index);
                *index += 1;
                let expression = format!(
                    "{} BETWEEN {} AND {}",
                    key_placeholder, value_placeholder_1, value_placeholder_2
                );
                expression_attribute_values
                    .insert(value_placeholder_1, types::AttributeValue::S(value1));
                expression_attribute_values
                    .insert(value_placeholder_2, types::AttributeValue::S(value2));
                expression
            }
            Self::Equals(value) => {
                let value_placeholder = format!(":{}_eq{}", key, index);
                *index += 1;
                let expression = format!("{} = {}", key_placeholder, value_placeholder);
                expression_attribute_values.insert(value_placeholder, types::AttributeValue::S(value));
                expression
            }
            Self::GreaterThan(value) => {
                let value_placeholder = format!(":{}_gt{}", key, index);
                *index += 1;
                let expression = format!("{} > {}", key_placeholder, value_placeholder);
                expression_attribute_values.insert(value_placeholder, types::AttributeValue::S(value));
                expression
            }
            Self::GreaterThanOrEqual(value) => {
                let value_placeholder = format!(":{}_gte{}", key, index);
                *index += 1;
                let expression = format!("{} >= {}", key_placeholder, value_placeholder);
                expression_attribute_values.insert(value_placeholder, types::AttributeValue::S(value));
                expression
            }
            Self::LessThan(value) => {
                let value_placeholder = format!(":{}_lt{}", key, index);
                *index += 1;
                let expression = format!("{} < {}", key_placeholder, value_placeholder);
                expression_attribute_values.insert(value_placeholder, types::AttributeValue::S(value));
                expression
            }
            Self::LessThanOrEqual(value) => {
                let value_placeholder = format!(":{}_lte{}", key, index);
                *index += 1;
                let expression = format!("{} <= {}", key_placeholder, value_placeholder);
                expression_attribute_values.insert(value_placeholder, types::AttributeValue::S(value));
                expression
            }
            Self::NotNull => {
                format!("attribute_exists({})", key_placeholder)
            }
            Self::Null => {
                format!("attribute_not_exists({})", key_placeholder)
            }
        };
        (expression, expression_attribute_values)
    }

    /// Evaluate the condition against the attribute's current value, `None` when absent.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Self::Null, value) => value.is_none(),
            (Self::NotNull, value) => value.is_some(),
            (_, None) => false,
            (Self::BeginsWith(prefix), Some(value)) => value.starts_with(prefix.as_str()),
            (Self::Between(low, high), Some(value)) => low.as_str() <= value && value <= high.as_str(),
            (Self::Equals(expected), Some(value)) => value == expected,
            (Self::GreaterThan(bound), Some(value)) => value > bound.as_str(),
            (Self::GreaterThanOrEqual(bound), Some(value)) => value >= bound.as_str(),
            (Self::LessThan(bound), Some(value)) => value < bound.as_str(),
            (Self::LessThanOrEqual(bound), Some(value)) => value <= bound.as_str(),
        }
    }
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

impl KeyCondition {
    /// Apply `condition` to the attribute `name`.
    pub fn new(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            condition,
            name: name.into(),
        }
    }

    pub(crate) fn get_expression_operation(keys: Vec<Self>) -> common::ExpressionInput {
        let mut expressions = Vec::with_capacity(keys.len());
        let mut expression_attribute_names = collections::HashMap::with_capacity(keys.len());
        let mut expression_attribute_values = collections::HashMap::new();
        let mut index = 0;
        for key in keys {
            let placeholder = format!("#{}", key.name);
            let (expression, condition_expression_attribute_values) = key
                .condition
                .get_expression(&key.name, &placeholder, &mut index);
            expressions.push(expression);
            expression_attribute_names.insert(placeholder, key.name);
            expression_attribute_values.extend(condition_expression_attribute_values);
        }
        common::ExpressionInput {
            expression: expressions.join(AND),
            expression_attribute_names,
            expression_attribute_values,
        }
    }
}

impl From<KeyCondition> for common::ExpressionInput {
    fn from(key_condition: KeyCondition) -> Self {
        KeyCondition::get_expression_operation(vec![key_condition])
    }
}
