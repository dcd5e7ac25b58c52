//! Key codec for the single-table layout.
//!
//! Every partition and sort key is a short entity tag followed by the raw identifier,
//! e.g. `o#42` for order `42`. Timestamps used as GSI sort keys are stored as fixed
//! width RFC 3339 strings so that byte order equals chronological order.

use crate::error::{Error, Result};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Partition key attribute.
pub const PK: &str = "pk";
/// Sort key attribute.
pub const SK: &str = "sk";
/// Entity discriminator attribute.
pub const ENTITY_TYPE: &str = "entityType";
/// First global secondary index.
pub const GSI1: &str = "gsi1";
/// Partition key attribute of [`GSI1`].
pub const GSI1_PK: &str = "gsi1_pk";
/// Sort key attribute of [`GSI1`].
pub const GSI1_SK: &str = "gsi1_sk";
/// Second global secondary index.
pub const GSI2: &str = "gsi2";
/// Partition key attribute of [`GSI2`].
pub const GSI2_PK: &str = "gsi2_pk";
/// Sort key attribute of [`GSI2`].
pub const GSI2_SK: &str = "gsi2_sk";

/// Entity tags placed in front of identifiers.
///
/// Changing a tag is a schema migration: every stored key embeds it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Prefix {
    /// `c#`
    Customer,
    /// `i#`
    Invoice,
    /// `o#`
    Order,
    /// `p#`
    Product,
    /// `s#`
    Shipment,
    /// `d#`
    ShipmentItem,
    /// `w#`
    Warehouse,
}

impl Prefix {
    /// The literal tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "c#",
            Self::Invoice => "i#",
            Self::Order => "o#",
            Self::Product => "p#",
            Self::Shipment => "s#",
            Self::ShipmentItem => "d#",
            Self::Warehouse => "w#",
        }
    }
}

/// Prepend the tag to an identifier.
///
/// Identifiers that already carry the tag are not tagged twice.
pub fn encode_key(id: &str, prefix: Prefix) -> String {
    format!("{}{}", prefix.as_str(), strip_prefix(id, prefix))
}

/// Recover the raw identifier from a key.
///
/// Fails with [`Error::MalformedKey`] when the key does not carry the expected tag
/// or carries nothing after it.
pub fn decode_key(key: &str, prefix: Prefix) -> Result<String> {
    match key.strip_prefix(prefix.as_str()) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::MalformedKey {
            key: key.to_string(),
            expected: prefix.as_str(),
        }),
    }
}

/// Drop every leading copy of the tag from an identifier.
///
/// Identifiers that already went through [`encode_key`] once or more come back raw.
pub fn strip_prefix(id: &str, prefix: Prefix) -> &str {
    let mut id = id;
    while let Some(rest) = id.strip_prefix(prefix.as_str()) {
        id = rest;
    }
    id
}

/// Truncate a timestamp to the precision it is stored with.
pub fn truncate_timestamp(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(3)
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp written by [`encode_timestamp`].
pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|source| Error::MalformedTimestamp {
            value: value.to_string(),
            source,
        })
}
