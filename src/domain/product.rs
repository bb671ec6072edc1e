//! Product domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    /// Exact decimal price; serialized as a string to avoid float drift
    pub price: Decimal,
}

/// Input for creating or replacing a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 100))]
    pub product_name: String,
    #[validate(custom(function = "non_negative_price"))]
    pub price: Decimal,
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}
