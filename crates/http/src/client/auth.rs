//! Authentication endpoints

use super::{PublicRosterClient, error::ClientError};
use crate::convert::NormalizeError;
use crate::types::{LoginRequest, LoginResponse};
use reqwest::Method;
use roster_core::User;

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

impl PublicRosterClient {
    /// Exchange credentials for a bearer token and the signed-in user
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, ClientError> {
        let request = self
            .request(Method::POST, &["auth", "login"])
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.execute(request).await?;

        let token = response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(NormalizeError::MissingField("token"))?;
        let user = User::try_from(
            response
                .user
                .ok_or(NormalizeError::MissingField("usuario"))?,
        )?;

        Ok(AuthGrant { user, token })
    }
}
