//! Order-product association ledger
//!
//! The many-to-many join between orders and products. The composite primary
//! key enforces at most one association per (order, product) pair; inserts
//! go through `INSERT IGNORE` so a duplicate add is an atomic no-op rather
//! than an error. Order and product ids are deliberately not validated here
//! (orphan rows are filtered out at aggregation time).

use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderProductRepository: Send + Sync {
    /// Insert the pair; succeeds silently if it already exists.
    async fn add(&self, order_id: i64, product_id: i64) -> Result<()>;
    /// Delete the pair; NotFound if it was absent.
    async fn remove(&self, order_id: i64, product_id: i64) -> Result<()>;
    /// Product ids associated with an order, in ascending id order.
    async fn list_product_ids(&self, order_id: i64) -> Result<Vec<i64>>;
}

pub struct OrderProductRepositoryImpl {
    pool: MySqlPool,
}

impl OrderProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderProductRepository for OrderProductRepositoryImpl {
    async fn add(&self, order_id: i64, product_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT IGNORE INTO order_products (order_id, product_id)
            VALUES (?, ?)
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, order_id: i64, product_id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM order_products
            WHERE order_id = ? AND product_id = ?
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Product {} is not in order {}",
                product_id, order_id
            )));
        }

        Ok(())
    }

    async fn list_product_ids(&self, order_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT product_id
            FROM order_products
            WHERE order_id = ?
            ORDER BY product_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
