//! User management service

use std::sync::Arc;

use roster_core::validation::{Validate, validators};
use roster_core::{NewLinkedAccount, NewUser, User, UserUpdate};
use roster_http::AuthenticatedRosterClient;
use tracing::{debug, info};

use crate::error::{ConsoleError, Result};
use crate::session::Session;

const LIST_FAILED: &str = "failed to fetch users";
const GET_FAILED: &str = "failed to fetch user";
const CREATE_FAILED: &str = "failed to create user";
const UPDATE_FAILED: &str = "failed to update user";
const DELETE_FAILED: &str = "failed to delete user";
const LINK_FAILED: &str = "failed to add linked account";
const UNLINK_FAILED: &str = "failed to remove linked account";
const PERMISSIONS_FAILED: &str = "failed to update permissions";

/// CRUD over users and their linked accounts.
///
/// Every call first takes the token from the session and fails with
/// [`ConsoleError::NotAuthenticated`] before any I/O when there is none.
/// Results are fresh snapshots; nothing is cached here.
#[derive(Clone)]
pub struct UserService {
    session: Arc<Session>,
}

impl UserService {
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn client(&self) -> Result<AuthenticatedRosterClient> {
        self.session.authenticated_client()
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let client = self.client()?;
        let users = client
            .list_users()
            .await
            .map_err(|e| ConsoleError::from_read(e, LIST_FAILED))?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Get a user by id; `None` when the server does not know it
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;

        match client.get_user(user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => {
                debug!(user_id, "User not found");
                Ok(None)
            }
            Err(e) => Err(ConsoleError::from_read(e, GET_FAILED)),
        }
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let client = self.client()?;
        user.validate()?;

        let created = client
            .create_user(user)
            .await
            .map_err(|e| ConsoleError::from_write(e, CREATE_FAILED))?;
        info!(user_id = %created.id, "Created user {}", created.email);
        Ok(created)
    }

    /// Update a user. Fields that are `None` or empty are left untouched server-side.
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;
        update.validate()?;

        let updated = client
            .update_user(user_id, update)
            .await
            .map_err(|e| ConsoleError::from_write(e, UPDATE_FAILED))?;
        info!(user_id, "Updated user");
        Ok(updated)
    }

    /// Delete a user. Linked accounts are the server's concern.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;

        client
            .delete_user(user_id)
            .await
            .map_err(|e| ConsoleError::from_write(e, DELETE_FAILED))?;
        info!(user_id, "Deleted user");
        Ok(())
    }

    /// Link an external account and return the updated user
    pub async fn add_linked_account(&self, user_id: &str, account: &NewLinkedAccount) -> Result<User> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;
        account.validate()?;

        let user = client
            .add_linked_account(user_id, account)
            .await
            .map_err(|e| ConsoleError::from_write(e, LINK_FAILED))?;
        info!(user_id, platform = %account.platform, "Linked account");
        Ok(user)
    }

    pub async fn remove_linked_account(&self, user_id: &str, account_id: &str) -> Result<User> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;
        validators::validate_path_segment(account_id, "account id")?;

        let user = client
            .remove_linked_account(user_id, account_id)
            .await
            .map_err(|e| ConsoleError::from_write(e, UNLINK_FAILED))?;
        info!(user_id, account_id, "Removed linked account");
        Ok(user)
    }

    /// Replace the user's permissions with exactly `permissions`, in order
    pub async fn set_permissions(&self, user_id: &str, permissions: &[String]) -> Result<User> {
        let client = self.client()?;
        validators::validate_path_segment(user_id, "user id")?;

        let user = client
            .set_permissions(user_id, permissions)
            .await
            .map_err(|e| ConsoleError::from_write(e, PERMISSIONS_FAILED))?;
        info!(user_id, count = permissions.len(), "Replaced permissions");
        Ok(user)
    }
}
