//! Read requests against the table.
//!
//! This module provides the reads the repositories are built from:
//! - Getting individual items by primary key
//! - Querying the table or an index with key conditions
//! - Scanning the entire table

/// Common utilities for read requests.
pub mod common;

/// Get item request for retrieving a single item by primary key.
pub mod get_item;

/// Query request for retrieving items with key conditions.
pub mod query;

/// Scan request for retrieving all items from a table.
pub mod scan;
