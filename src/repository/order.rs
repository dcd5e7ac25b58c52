use crate::{
    common::{
        condition::{Condition, KeyCondition},
        key::Key,
    },
    error::Result,
    keys::{self, Prefix},
    model::{Mapper, Order, OrderItem, ShipmentItem},
    read::query::Query,
    store::Store,
    write::{put_item::PutItem, transact_write_items::TransactWriteItem},
};

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Orders together with the order items and shipment items stored under them.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn Store>,
}

impl OrderRepository {
    /// Create a repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create or replace an order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_customer_order", skip(self), err)
    )]
    pub async fn save_customer_order(&self, order: Order) -> Result<Order> {
        let order = order.with_defaults();
        super::put(self.store.as_ref(), &order).await?;
        Ok(order)
    }

    /// Look up an order by its identifier and its customer.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_customer_order_by_id", skip(self), err)
    )]
    pub async fn get_customer_order_by_id(
        &self,
        order_id: &str,
        customer_id: &str,
    ) -> Result<Option<Order>> {
        super::get(
            self.store.as_ref(),
            Order::primary_key(order_id, customer_id),
        )
        .await
    }

    /// Remove an order row. Its items are left in place.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.delete_customer_order", skip(self), err)
    )]
    pub async fn delete_customer_order(&self, order_id: &str, customer_id: &str) -> Result<()> {
        self.store
            .delete_item(Order::primary_key(order_id, customer_id))
            .await
    }

    /// Create or replace the item for a product within an order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_order_item", skip(self), err)
    )]
    pub async fn save_order_item(&self, item: OrderItem) -> Result<OrderItem> {
        let item = item.with_defaults();
        super::put(self.store.as_ref(), &item).await?;
        Ok(item)
    }

    /// Remove the item for a product within an order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.delete_order_item", skip(self), err)
    )]
    pub async fn delete_order_item(&self, order_id: &str, product_id: &str) -> Result<()> {
        self.store
            .delete_item(OrderItem::primary_key(order_id, product_id))
            .await
    }

    /// Items of an order, in product key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_order_items_by_order_id", skip(self), err)
    )]
    pub async fn get_order_items_by_order_id(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        let query = Query::new(Key::new(
            keys::PK,
            keys::encode_key(order_id, Prefix::Order),
        ))
        .sort_key(KeyCondition::new(
            keys::SK,
            Condition::BeginsWith(Prefix::Product.as_str().to_string()),
        ));
        super::query(self.store.as_ref(), query).await
    }

    /// Items ordering a product between `from` and `to` inclusive, oldest first.
    ///
    /// A `from` later than `to` is rejected by the store as a validation error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_order_items_by_product_id", skip(self), err)
    )]
    pub async fn get_order_items_by_product_id(
        &self,
        product_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<OrderItem>> {
        let query = date_range(
            keys::GSI1,
            Key::new(keys::GSI1_PK, keys::encode_key(product_id, Prefix::Product)),
            keys::GSI1_SK,
            from,
            to,
        );
        super::query(self.store.as_ref(), query).await
    }

    /// Items ordered by a customer between `from` and `to` inclusive, oldest first.
    ///
    /// A `from` later than `to` is rejected by the store as a validation error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_order_items_by_customer_id", skip(self), err)
    )]
    pub async fn get_order_items_by_customer_id(
        &self,
        customer_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<OrderItem>> {
        let query = date_range(
            keys::GSI2,
            Key::new(keys::GSI2_PK, keys::encode_key(customer_id, Prefix::Customer)),
            keys::GSI2_SK,
            from,
            to,
        );
        super::query(self.store.as_ref(), query).await
    }

    /// Create or replace a shipment item of an order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.save_order_shipment_item", skip(self), err)
    )]
    pub async fn save_order_shipment_item(&self, item: ShipmentItem) -> Result<ShipmentItem> {
        let item = item.with_defaults();
        super::put(self.store.as_ref(), &item).await?;
        Ok(item)
    }

    /// Shipment items of an order, in key order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.get_shipment_items_by_order_id", skip(self), err)
    )]
    pub async fn get_shipment_items_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Vec<ShipmentItem>> {
        let query = Query::new(Key::new(
            keys::PK,
            keys::encode_key(order_id, Prefix::Order),
        ))
        .sort_key(KeyCondition::new(
            keys::SK,
            Condition::BeginsWith(Prefix::ShipmentItem.as_str().to_string()),
        ));
        super::query(self.store.as_ref(), query).await
    }

    /// Write a new order and its items in one transaction.
    ///
    /// Items are attached to the order: they take its identifier and customer, and
    /// its date when they carry none. The transaction is cancelled with
    /// [`Error::TransactionCanceled`](crate::error::Error::TransactionCanceled) if the
    /// order already exists, in which case nothing is written.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.create_customer_order", skip(self), err)
    )]
    pub async fn create_customer_order(
        &self,
        order: Order,
        items: Vec<OrderItem>,
    ) -> Result<(Order, Vec<OrderItem>)> {
        let order = order.with_defaults();
        let order_id = order.id.clone().unwrap_or_default();
        let items: Vec<OrderItem> = items
            .into_iter()
            .map(|item| {
                OrderItem {
                    order_id: order_id.clone(),
                    customer_id: order.customer_id.clone(),
                    date: item.date.or(order.date),
                    ..item
                }
                .with_defaults()
            })
            .collect();

        let mut writes = Vec::with_capacity(items.len() + 1);
        writes.push(TransactWriteItem::Put(PutItem {
            item: order.to_record()?,
            condition: Some(KeyCondition::new(keys::PK, Condition::Null)),
        }));
        for item in &items {
            writes.push(TransactWriteItem::Put(PutItem {
                item: item.to_record()?,
                condition: None,
            }));
        }
        self.store.transact_write_items(writes).await?;
        Ok((order, items))
    }
}

fn date_range(
    index_name: &str,
    partition_key: Key,
    sort_key_name: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Query {
    Query::new(partition_key)
        .index(index_name)
        .sort_key(KeyCondition::new(
            sort_key_name,
            Condition::Between(keys::encode_timestamp(&from), keys::encode_timestamp(&to)),
        ))
}
