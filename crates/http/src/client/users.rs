//! User and linked-account endpoints

use super::{AuthenticatedRosterClient, error::ClientError};
use crate::types::{
    CreateUserRequest, DataEnvelope, LinkAccountRequest, PermissionsRequest, UpdateUserRequest,
    WireUser,
};
use reqwest::Method;
use roster_core::{NewLinkedAccount, NewUser, User, UserUpdate};

const USERS: &str = "usuarios";

impl AuthenticatedRosterClient {
    async fn fetch_user(&self, request: reqwest::RequestBuilder) -> Result<User, ClientError> {
        let envelope: DataEnvelope<WireUser> = self.execute(request).await?;
        Ok(User::try_from(envelope.data)?)
    }

    /// List every user
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let envelope: DataEnvelope<Vec<WireUser>> =
            self.execute(self.request(Method::GET, &[USERS])).await?;

        envelope
            .data
            .into_iter()
            .map(|user| User::try_from(user).map_err(ClientError::from))
            .collect()
    }

    /// Get a single user. A missing user is reported as a 404 status error.
    pub async fn get_user(&self, user_id: &str) -> Result<User, ClientError> {
        self.fetch_user(self.request(Method::GET, &[USERS, user_id]))
            .await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let request = self
            .request(Method::POST, &[USERS])
            .json(&CreateUserRequest::from(user));
        self.fetch_user(request).await
    }

    /// Update a user; only non-empty fields of `update` are sent
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        let request = self
            .request(Method::PUT, &[USERS, user_id])
            .json(&UpdateUserRequest::from(update));
        self.fetch_user(request).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), ClientError> {
        self.execute_discarding_body(self.request(Method::DELETE, &[USERS, user_id]))
            .await
    }

    /// Link an external account; returns the owning user as updated by the server
    pub async fn add_linked_account(
        &self,
        user_id: &str,
        account: &NewLinkedAccount,
    ) -> Result<User, ClientError> {
        let request = self
            .request(Method::POST, &[USERS, user_id, "cuentas"])
            .json(&LinkAccountRequest::from(account));
        self.fetch_user(request).await
    }

    pub async fn remove_linked_account(
        &self,
        user_id: &str,
        account_id: &str,
    ) -> Result<User, ClientError> {
        self.fetch_user(self.request(Method::DELETE, &[USERS, user_id, "cuentas", account_id]))
            .await
    }

    /// Replace the user's permission list
    pub async fn set_permissions(
        &self,
        user_id: &str,
        permissions: &[String],
    ) -> Result<User, ClientError> {
        let request = self
            .request(Method::PUT, &[USERS, user_id, "permisos"])
            .json(&PermissionsRequest { permissions });
        self.fetch_user(request).await
    }
}
