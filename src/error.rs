//! Error types shared by the key codec, the mappers, the stores and the repositories.

use crate::model::EntityType;

use aws_sdk_dynamodb::{error::SdkError, operation, types};
use std::collections;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the single-table layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A key segment does not carry the prefix its position requires.
    #[error("malformed key `{key}`: expected prefix `{expected}`")]
    MalformedKey {
        /// The offending key.
        key: String,
        /// The prefix the key should have started with.
        expected: &'static str,
    },
    /// A stored timestamp cannot be parsed back.
    #[error("malformed timestamp `{value}`")]
    MalformedTimestamp {
        /// The offending value.
        value: String,
        /// The parse failure.
        #[source]
        source: chrono::ParseError,
    },
    /// A field required to build a record has not been filled in.
    #[error("{entity_type} is missing `{field}`")]
    MissingField {
        /// The entity being encoded.
        entity_type: EntityType,
        /// The missing field.
        field: &'static str,
    },
    /// A record was decoded with the mapper of another entity type.
    #[error("expected a `{expected}` record, found `{found}`")]
    EntityTypeMismatch {
        /// The entity type of the mapper.
        expected: EntityType,
        /// The discriminator found in the record, empty when absent.
        found: String,
    },
    /// Converting between attribute maps and record layouts failed.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// The store rejected or failed the request.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A transactional write was cancelled as a whole.
    #[error("transaction cancelled: {}", describe_reasons(.reasons))]
    TransactionCanceled {
        /// One reason per participating item, in request order.
        reasons: Vec<CancellationReason>,
    },
    /// Loading the table configuration failed.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

/// Failures coming from the store, kept as the underlying service returned them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// GetItem failed.
    #[error(transparent)]
    GetItem(#[from] SdkError<operation::get_item::GetItemError>),
    /// PutItem failed.
    #[error(transparent)]
    PutItem(#[from] SdkError<operation::put_item::PutItemError>),
    /// Query failed.
    #[error(transparent)]
    Query(#[from] SdkError<operation::query::QueryError>),
    /// DeleteItem failed.
    #[error(transparent)]
    DeleteItem(#[from] SdkError<operation::delete_item::DeleteItemError>),
    /// Scan failed.
    #[error(transparent)]
    Scan(#[from] SdkError<operation::scan::ScanError>),
    /// TransactWriteItems failed for a reason other than cancellation.
    #[error(transparent)]
    TransactWriteItems(#[from] SdkError<operation::transact_write_items::TransactWriteItemsError>),
    /// The store refused a request it cannot serve.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Why one item of a transactional write did not go through.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CancellationReason {
    /// Cancellation code, `None` (the literal string) for items that were fine.
    pub code: Option<String>,
    /// Human readable detail.
    pub message: Option<String>,
    /// The existing item, when the request asked for it.
    pub item: Option<collections::HashMap<String, types::AttributeValue>>,
}

impl CancellationReason {
    /// Whether this item caused the cancellation.
    pub fn is_failure(&self) -> bool {
        !matches!(self.code.as_deref(), None | Some("None"))
    }
}

impl From<&types::CancellationReason> for CancellationReason {
    fn from(reason: &types::CancellationReason) -> Self {
        Self {
            code: reason.code().map(str::to_string),
            message: reason.message().map(str::to_string),
            item: reason.item().cloned(),
        }
    }
}

fn describe_reasons(reasons: &[CancellationReason]) -> String {
    reasons
        .iter()
        .map(|reason| reason.code.as_deref().unwrap_or("None"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::none_code(None, false)]
    #[case::none_literal(Some("None"), false)]
    #[case::conditional_check(Some("ConditionalCheckFailed"), true)]
    #[case::conflict(Some("TransactionConflict"), true)]
    fn test_is_failure(#[case] code: Option<&str>, #[case] expected: bool) {
        let reason = CancellationReason {
            code: code.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(reason.is_failure(), expected);
    }

    #[test]
    fn test_transaction_canceled_display() {
        let error = Error::TransactionCanceled {
            reasons: vec![
                CancellationReason {
                    code: Some("ConditionalCheckFailed".to_string()),
                    ..Default::default()
                },
                CancellationReason {
                    code: Some("None".to_string()),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "transaction cancelled: ConditionalCheckFailed, None"
        );
    }

    #[test]
    fn test_malformed_key_display() {
        let error = Error::MalformedKey {
            key: "p#1".to_string(),
            expected: "o#",
        };
        assert_eq!(error.to_string(), "malformed key `p#1`: expected prefix `o#`");
    }
}
