//! Product repository

use crate::domain::{Product, ProductInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: &ProductInput) -> Result<Product>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    /// Fetch the products whose ids resolve, in ascending id order.
    /// Ids with no matching row are simply absent from the result.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: i64, input: &ProductInput) -> Result<Product>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, input: &ProductInput) -> Result<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (product_name, price)
            VALUES (?, ?)
            "#,
        )
        .bind(&input.product_name)
        .bind(input.price)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create product")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_name, price
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, product_name, price FROM products WHERE id IN ({}) ORDER BY id",
            placeholders
        );

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_name, price
            FROM products
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: i64, input: &ProductInput) -> Result<Product> {
        let _ = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        sqlx::query(
            r#"
            UPDATE products
            SET product_name = ?, price = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.product_name)
        .bind(input.price)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update product")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        Ok(())
    }
}
