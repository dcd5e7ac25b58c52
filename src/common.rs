//! Common utilities for DynamoDB requests.
//!
//! This module provides shared types used across read and write requests,
//! including key handling and key/write condition expressions.

/// Condition expression building for key conditions and conditional writes.
pub mod condition;

/// Key types for identifying items in the table.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// A physical row of the table: attribute name to attribute value.
pub type Record = collections::HashMap<String, types::AttributeValue>;

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    /// Split into the optional parts the SDK builders take.
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<String>,
        Option<collections::HashMap<String, String>>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let values = if self.expression_attribute_values.is_empty() {
            None
        } else {
            Some(self.expression_attribute_values)
        };
        (
            Some(self.expression),
            Some(self.expression_attribute_names),
            values,
        )
    }
}
