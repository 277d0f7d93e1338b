use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Administrative role of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    RegularUser,
}

impl Role {
    /// All roles, in the order they are presented to operators
    pub const ALL: [Self; 3] = [Self::RegularUser, Self::Manager, Self::Admin];

    /// Value the backend uses for this role
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "gerente",
            Self::RegularUser => "usuario",
        }
    }

    /// Parse the backend's value for a role
    pub fn from_wire(value: &str) -> Result<Self, CoreError> {
        match value {
            "admin" => Ok(Self::Admin),
            "gerente" => Ok(Self::Manager),
            "usuario" => Ok(Self::RegularUser),
            other => Err(CoreError::unknown_variant("role", other)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::RegularUser => "regular-user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Accepts both the client names and the backend's names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" | "gerente" => Ok(Self::Manager),
            "regular-user" | "user" | "usuario" => Ok(Self::RegularUser),
            other => Err(CoreError::unknown_variant("role", other)),
        }
    }
}

/// Whether a user or linked account is in use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::Inactive => "inactivo",
        }
    }

    pub fn from_wire(value: &str) -> Result<Self, CoreError> {
        match value {
            "activo" => Ok(Self::Active),
            "inactivo" => Ok(Self::Inactive),
            other => Err(CoreError::unknown_variant("status", other)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "activo" => Ok(Self::Active),
            "inactive" | "inactivo" => Ok(Self::Inactive),
            other => Err(CoreError::unknown_variant("status", other)),
        }
    }
}

/// A user's identity on an external platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub id: String,
    pub platform: String,
    /// Username on the external platform
    pub username: String,
    pub email: String,
    /// Role label on the external platform, free text
    pub role: String,
    pub status: Status,
    pub linked_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A user record as normalized from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Creation date, display only
    pub created_on: NaiveDate,
    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
}

impl User {
    /// Check whether the user holds a permission tag
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn linked_account(&self, account_id: &str) -> Option<&LinkedAccount> {
        self.linked_accounts.iter().find(|a| a.id == account_id)
    }
}

/// Fields for creating a user; the server assigns id and creation date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub phone: Option<String>,
    pub department: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Partial update of a user. Fields left `None` (or empty) are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<Status>,
    pub role: Option<Role>,
    pub department: Option<String>,
}

impl UserUpdate {
    /// True when nothing would be sent to the server
    pub fn is_empty(&self) -> bool {
        fn blank(value: Option<&String>) -> bool {
            value.is_none_or(|v| v.is_empty())
        }

        blank(self.name.as_ref())
            && blank(self.email.as_ref())
            && blank(self.phone.as_ref())
            && blank(self.department.as_ref())
            && self.status.is_none()
            && self.role.is_none()
    }
}

/// Fields for linking an external account to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkedAccount {
    pub platform: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub status: Status,
    pub linked_on: NaiveDate,
    pub url: Option<String>,
}

impl NewLinkedAccount {
    pub fn new(
        platform: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        linked_on: NaiveDate,
    ) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
            email: email.into(),
            role: role.into(),
            status: Status::Active,
            linked_on,
            url: None,
        }
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
