//! Bearer-token authentication guard
//!
//! `require_auth` is the single enforcement point for protected routes: it
//! verifies the bearer token once, short-circuits with 401 on any failure,
//! and on success makes the caller available to handlers through the
//! `AuthUser` extractor. Handlers never re-check authorization.
//!
//! Every rejection carries the same response body; the concrete cause is
//! only visible in the logs.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::token::{TokenManager, VerifyError};

/// Authenticated caller identity resolved from the access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token's `sub` claim
    pub user_id: i64,
}

/// Authentication failures, kept apart for diagnostics only
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken,
    /// Token has expired
    TokenExpired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(cause = ?self, "rejected unauthenticated request");

        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": "Invalid or missing credentials"
            })),
        )
            .into_response()
    }
}

/// Extract and validate the Bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::InvalidHeader("Authorization header must use Bearer scheme".to_string())
    })
}

/// Shared state for the authentication middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    tokens: TokenManager,
}

impl AuthMiddlewareState {
    pub fn new(tokens: TokenManager) -> Self {
        Self { tokens }
    }
}

/// Authentication enforcement middleware for protected routes
pub async fn require_auth(
    State(auth_state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let claims = {
        let token = match extract_bearer_token(request.headers()) {
            Ok(token) => token,
            Err(err) => return err.into_response(),
        };

        match auth_state.tokens.verify(token) {
            Ok(claims) => claims,
            Err(VerifyError::Expired) => return AuthError::TokenExpired.into_response(),
            Err(VerifyError::Invalid) => return AuthError::InvalidToken.into_response(),
        }
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => return AuthError::InvalidToken.into_response(),
    };

    request.extensions_mut().insert(AuthUser { user_id });
    next.run(request).await
}

/// Extractor handing the verified caller identity to handlers.
///
/// Only populated on routes behind `require_auth`; elsewhere extraction
/// fails with the uniform 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}
