#![deny(missing_docs)]

//! # DynamoDB Orders
//!
//! Repositories for an order management domain stored in a single DynamoDB table.
//!
//! ## Overview
//!
//! Orders, order items, shipment items, invoices, products, customers, shipments and
//! warehouses share one table. Every record carries a composite primary key
//! (`pk`, `sk`) built from tagged identifiers such as `o#42`, an `entityType`
//! discriminator, and for some entities the keys of two sparse global secondary
//! indexes (`gsi1`, `gsi2`). Each access pattern is a single get, put, delete or
//! key-condition query:
//!
//! | Record | `pk` | `sk` | `gsi1` | `gsi2` |
//! |---|---|---|---|---|
//! | order | `o#{id}` | `c#{customer}` | | |
//! | order item | `o#{order}` | `p#{product}` | `p#{product}` / date | `c#{customer}` / date |
//! | shipment item | `o#{order}` | `d#{id}` | | |
//! | invoice | `o#{order}` | `i#{id}` | `i#{id}` / `i#{id}` | |
//! | shipment | `o#{order}` | `s#{id}` | `s#{id}` / `s#{id}` | `w#{warehouse}` / `s#{id}` |
//! | product | `p#{id}` | `p#{id}` | | |
//! | customer | `c#{id}` | `c#{id}` | | |
//! | warehouse | `w#{id}` | `w#{id}` | | |
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_orders::{
//!     config::TableConfig,
//!     model::{Order, OrderItem},
//!     repository::OrderRepository,
//!     store::DynamoStore,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DynamoStore::from_config(&TableConfig::from_env()?).await;
//! let orders = OrderRepository::new(Arc::new(store));
//!
//! let order = orders
//!     .save_customer_order(Order {
//!         customer_id: "c1".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! let order_id = order.id.clone().unwrap_or_default();
//! orders
//!     .save_order_item(OrderItem {
//!         order_id: order_id.clone(),
//!         product_id: "p1".to_string(),
//!         customer_id: order.customer_id.clone(),
//!         quantity: 2,
//!         ..Default::default()
//!     })
//!     .await?;
//! let items = orders.get_order_items_by_order_id(&order_id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@repository`] - Repository operations per aggregate
//! - [`mod@model`] - Domain entities and their record mappers
//! - [`mod@store`] - The table backends: DynamoDB and in-process
//! - [`mod@keys`] - Key prefixes and the timestamp codec
//! - [`mod@common`], [`mod@read`], [`mod@write`] - Request builders the DynamoDB backend sends

/// Common utilities for keys and conditions.
pub mod common;

pub mod config;

pub mod error;

pub mod identity;

pub mod keys;

pub mod model;

/// Read requests for retrieving data from the table.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning the entire table
pub mod read;

pub mod repository;

pub mod store;

/// Write requests for modifying data in the table.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Deleting items by key
/// - Writing several items in one transaction
pub mod write;

pub use error::{Error, Result};
