//! Login API handler

use crate::domain::LoginInput;
use crate::error::Result;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Successful login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Exchange email/password credentials for a bearer token
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let access_token = state.auth_service().login(input).await?;
    Ok(Json(TokenResponse { access_token }))
}
