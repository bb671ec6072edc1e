//! Product API handlers

use crate::api::{PaginatedResponse, PaginationQuery};
use crate::domain::ProductInput;
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// List products
pub async fn list<S: HasServices>(
    State(state): State<S>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (products, total) = state
        .product_service()
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        products,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get product by ID
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().get(id).await?;
    Ok(Json(product))
}

/// Create product
pub async fn create<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse> {
    let product = state.product_service().update(id, input).await?;
    Ok(Json(product))
}

/// Delete product
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.product_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
