//! Identity assignment for entities saved without an identifier.

use crate::keys::{self, Prefix};

use uuid::Uuid;

/// Resolve the identifier an entity is stored under.
///
/// A present, non-empty identifier is kept after stripping any copies of the entity
/// tag already attached to it. Otherwise a random v4 UUID is generated.
pub fn assign_id(id: Option<&str>, prefix: Prefix) -> String {
    match id.map(|id| keys::strip_prefix(id, prefix)) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}
