//! Order repository

use crate::domain::Order;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, user_id: i64, order_date: DateTime<Utc>) -> Result<Order>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Order>>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>>;
    /// The user's most recent order; equal timestamps resolve to the
    /// highest order id.
    async fn latest_for_user(&self, user_id: i64) -> Result<Option<Order>>;
}

pub struct OrderRepositoryImpl {
    pool: MySqlPool,
}

impl OrderRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create(&self, user_id: i64, order_date: DateTime<Utc>) -> Result<Order> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (order_date, user_id)
            VALUES (?, ?)
            "#,
        )
        .bind(order_date)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create order")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_date, user_id
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_date, user_id
            FROM orders
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn latest_for_user(&self, user_id: i64) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_date, user_id
            FROM orders
            WHERE user_id = ?
            ORDER BY order_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
