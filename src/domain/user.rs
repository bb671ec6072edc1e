//! User domain model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User entity
///
/// The password hash is carried for credential checks but never leaves the
/// service in a response body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Input for registering a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Input for the self-service user update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: String,
}

/// A user row ready for insertion, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub address: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
