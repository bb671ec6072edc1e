//! Order domain model
//!
//! An order row carries only its identity, timestamp and owning user; its
//! contents live in the `order_products` association table and are derived
//! at query time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_date: DateTime<Utc>,
    pub user_id: i64,
}

/// Input for creating an order
///
/// The user id is trusted as given; existence is deliberately not checked
/// against the credential store (orphaned orders are tolerated).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub user_id: i64,
    /// Defaults to the current time when omitted
    pub order_date: Option<DateTime<Utc>>,
}
