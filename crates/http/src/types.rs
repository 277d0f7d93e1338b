//! Wire schema of the user administration backend.
//!
//! Field names follow the backend. Optional fields tolerate both absence and
//! `null`; anything else missing is a schema mismatch.

use roster_core::{NewLinkedAccount, NewUser, UserUpdate};
use serde::{Deserialize, Serialize};

/// `{ "datos": ... }` envelope wrapping every record response
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(rename = "datos")]
    pub data: T,
}

/// Error payload returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(rename = "contraseña")]
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "usuario", default)]
    pub user: Option<WireUser>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Linked account as stored by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct WireLinkedAccount {
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "plataforma")]
    pub platform: String,
    #[serde(rename = "usuario")]
    pub username: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fechaVinculacion")]
    pub linked_on: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// User record as stored by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "permisos", default)]
    pub permissions: Option<Vec<String>>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "departamento", default)]
    pub department: Option<String>,
    #[serde(rename = "cuentasVinculadas", default)]
    pub linked_accounts: Option<Vec<WireLinkedAccount>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    pub email: &'a str,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(rename = "estado")]
    pub status: &'static str,
    #[serde(rename = "rol")]
    pub role: &'static str,
    #[serde(rename = "departamento", skip_serializing_if = "Option::is_none")]
    pub department: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for CreateUserRequest<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
            phone: non_empty(user.phone.as_deref()),
            status: user.status.as_wire(),
            role: user.role.as_wire(),
            department: non_empty(user.department.as_deref()),
        }
    }
}

/// Partial update body; only non-empty fields are serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest<'a> {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(rename = "departamento", skip_serializing_if = "Option::is_none")]
    pub department: Option<&'a str>,
}

impl<'a> From<&'a UserUpdate> for UpdateUserRequest<'a> {
    fn from(update: &'a UserUpdate) -> Self {
        Self {
            name: non_empty(update.name.as_deref()),
            email: non_empty(update.email.as_deref()),
            phone: non_empty(update.phone.as_deref()),
            status: update.status.map(roster_core::Status::as_wire),
            role: update.role.map(roster_core::Role::as_wire),
            department: non_empty(update.department.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAccountRequest<'a> {
    #[serde(rename = "plataforma")]
    pub platform: &'a str,
    #[serde(rename = "usuario")]
    pub username: &'a str,
    pub email: &'a str,
    #[serde(rename = "rol")]
    pub role: &'a str,
    #[serde(rename = "estado")]
    pub status: &'static str,
    #[serde(rename = "fechaVinculacion")]
    pub linked_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

impl<'a> From<&'a NewLinkedAccount> for LinkAccountRequest<'a> {
    fn from(account: &'a NewLinkedAccount) -> Self {
        Self {
            platform: &account.platform,
            username: &account.username,
            email: &account.email,
            role: &account.role,
            status: account.status.as_wire(),
            linked_on: account.linked_on.format("%Y-%m-%d").to_string(),
            url: non_empty(account.url.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionsRequest<'a> {
    #[serde(rename = "permisos")]
    pub permissions: &'a [String],
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
