//! Write requests against the table.
//!
//! This module provides the writes the repositories are built from:
//! - Putting new items or replacing existing ones
//! - Deleting items by primary key
//! - Writing several items atomically

/// Common utilities and types for write requests.
pub mod common;

/// Delete item request for removing items from the table.
pub mod delete_item;

/// Put item request for creating or replacing items.
pub mod put_item;

/// Transactional write of several puts and deletes.
pub mod transact_write_items;
