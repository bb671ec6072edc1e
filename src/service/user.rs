//! User business logic

use crate::crypto;
use crate::domain::{CreateUserInput, NewUser, UpdateUserInput, User};
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use std::sync::Arc;
use validator::Validate;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a new user. The plaintext password is hashed here and never
    /// stored or returned.
    pub async fn register(&self, input: CreateUserInput) -> Result<User> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                input.email
            )));
        }

        let password_hash = crypto::hash_password(&input.password)?;
        self.repo
            .create(&NewUser {
                name: input.name,
                address: input.address,
                email: input.email,
                password_hash,
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<User>, i64)> {
        let offset = (page - 1) * per_page;
        let users = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    pub async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User> {
        input.validate()?;

        let existing = self.get(id).await?;
        if input.email != existing.email && self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                input.email
            )));
        }

        self.repo.update(id, &input).await
    }

    /// Delete the user. Their orders are deliberately left in place.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await
    }
}
