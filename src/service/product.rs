//! Product catalog business logic

use crate::domain::{Product, ProductInput};
use crate::error::{AppError, Result};
use crate::repository::ProductRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        input.validate()?;
        self.repo.create(&input).await
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Product>, i64)> {
        let offset = (page - 1) * per_page;
        let products = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((products, total))
    }

    pub async fn update(&self, id: i64, input: ProductInput) -> Result<Product> {
        input.validate()?;
        self.repo.update(id, &input).await
    }

    /// Delete the product. Associations pointing at it become orphans and
    /// disappear from aggregation results.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }
}
