//! Order API handlers

use crate::domain::CreateOrderInput;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order total response
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderTotal {
    pub order_id: i64,
    pub total_cost: Decimal,
}

/// Create an order
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateOrderInput>,
) -> Result<impl IntoResponse> {
    tracing::debug!(caller = auth.user_id, user_id = input.user_id, "creating order");
    let order = state.order_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Add a product to an order (idempotent)
pub async fn add_product<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path((order_id, product_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    tracing::debug!(
        caller = auth.user_id,
        order_id,
        product_id,
        "adding product to order"
    );
    state
        .order_service()
        .add_product(order_id, product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a product from an order
pub async fn remove_product<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path((order_id, product_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    tracing::debug!(
        caller = auth.user_id,
        order_id,
        product_id,
        "removing product from order"
    );
    state
        .order_service()
        .remove_product(order_id, product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a user's orders
pub async fn by_user<S: HasServices>(
    State(state): State<S>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let orders = state.order_service().orders_by_user(user_id).await?;
    Ok(Json(orders))
}

/// List the products in an order
pub async fn products<S: HasServices>(
    State(state): State<S>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let products = state.order_service().products_in_order(order_id).await?;
    Ok(Json(products))
}

/// Total cost of an order
pub async fn total<S: HasServices>(
    State(state): State<S>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let total_cost = state.order_service().total_cost(order_id).await?;
    Ok(Json(OrderTotal {
        order_id,
        total_cost,
    }))
}

/// A user's most recent order
pub async fn latest<S: HasServices>(
    State(state): State<S>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let order = state.order_service().latest_order_for_user(user_id).await?;
    Ok(Json(order))
}
