//! Order aggregate and its aggregation queries
//!
//! Owns order creation and the order/product association workflow, and
//! answers the derived queries (contents, total cost, latest order). Order
//! contents are never stored inline: they are an explicit id-list lookup in
//! the association ledger joined against the catalog at query time, so
//! associations whose product no longer resolves simply drop out.

use crate::domain::{CreateOrderInput, Order, Product};
use crate::error::{AppError, Result};
use crate::repository::{OrderProductRepository, OrderRepository, ProductRepository};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct OrderService<O, L, P>
where
    O: OrderRepository,
    L: OrderProductRepository,
    P: ProductRepository,
{
    orders: Arc<O>,
    ledger: Arc<L>,
    products: Arc<P>,
}

impl<O, L, P> OrderService<O, L, P>
where
    O: OrderRepository,
    L: OrderProductRepository,
    P: ProductRepository,
{
    pub fn new(orders: Arc<O>, ledger: Arc<L>, products: Arc<P>) -> Self {
        Self {
            orders,
            ledger,
            products,
        }
    }

    /// Create an order, defaulting the timestamp to now. The user id is
    /// taken as given without an existence check.
    pub async fn create(&self, input: CreateOrderInput) -> Result<Order> {
        let order_date = input.order_date.unwrap_or_else(Utc::now);
        self.orders.create(input.user_id, order_date).await
    }

    /// Attach a product to an order; retried adds are a silent no-op.
    pub async fn add_product(&self, order_id: i64, product_id: i64) -> Result<()> {
        self.ledger.add(order_id, product_id).await
    }

    /// Detach a product from an order; fails if the pair was absent.
    pub async fn remove_product(&self, order_id: i64, product_id: i64) -> Result<()> {
        self.ledger.remove(order_id, product_id).await
    }

    pub async fn orders_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        self.orders.list_by_user(user_id).await
    }

    /// The products currently in an order. Associations pointing at a
    /// product that no longer exists are silently excluded.
    pub async fn products_in_order(&self, order_id: i64) -> Result<Vec<Product>> {
        let ids = self.ledger.list_product_ids(order_id).await?;
        self.products.find_by_ids(&ids).await
    }

    /// Exact decimal sum over the resolvable products of an order; zero for
    /// an order with nothing in it.
    pub async fn total_cost(&self, order_id: i64) -> Result<Decimal> {
        let products = self.products_in_order(order_id).await?;
        Ok(products.iter().map(|p| p.price).sum())
    }

    pub async fn latest_order_for_user(&self, user_id: i64) -> Result<Order> {
        self.orders
            .latest_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No orders found for user {}", user_id)))
    }
}
