//! Login and token issuance

use crate::crypto;
use crate::domain::LoginInput;
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use crate::token::TokenManager;
use std::sync::Arc;

pub struct AuthService<R: UserRepository> {
    user_repo: Arc<R>,
    tokens: TokenManager,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repo: Arc<R>, tokens: TokenManager) -> Self {
        Self { user_repo, tokens }
    }

    /// Exchange credentials for an access token.
    ///
    /// Unknown email and wrong password produce the same unauthorized
    /// outcome so the response does not reveal which one failed.
    pub async fn login(&self, input: LoginInput) -> Result<String> {
        let user = match self.user_repo.find_by_email(&input.email).await? {
            Some(user) => user,
            None => {
                return Err(AppError::Unauthorized(format!(
                    "login failed: unknown email '{}'",
                    input.email
                )))
            }
        };

        if !crypto::verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(format!(
                "login failed: wrong password for user {}",
                user.id
            )));
        }

        self.tokens.issue(user.id)
    }
}
