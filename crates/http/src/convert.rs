//! Conversions from the wire schema to `roster-core` records

use chrono::{NaiveDate, Utc};
use roster_core::{CoreError, LinkedAccount, Role, Status, User};
use thiserror::Error;

use crate::types::{WireLinkedAccount, WireUser};

/// A backend record that does not fit the expected schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a calendar date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error(transparent)]
    Value(#[from] CoreError),
}

/// Normalize a backend user, defaulting a missing creation date to `today`
pub fn normalize_user(wire: WireUser, today: NaiveDate) -> Result<User, NormalizeError> {
    let id = canonical_id(wire.object_id, wire.id)?;

    let created_on = match wire.created_at.as_deref() {
        Some(raw) => parse_calendar_date(raw, "createdAt")?,
        None => today,
    };

    let linked_accounts = wire
        .linked_accounts
        .unwrap_or_default()
        .into_iter()
        .map(normalize_linked_account)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(User {
        id,
        name: wire.name,
        email: wire.email,
        role: Role::from_wire(&wire.role)?,
        status: Status::from_wire(&wire.status)?,
        permissions: wire.permissions.unwrap_or_default(),
        phone: wire.phone,
        department: wire.department,
        created_on,
        linked_accounts,
    })
}

pub fn normalize_linked_account(wire: WireLinkedAccount) -> Result<LinkedAccount, NormalizeError> {
    Ok(LinkedAccount {
        id: canonical_id(wire.object_id, wire.id)?,
        platform: wire.platform,
        username: wire.username,
        email: wire.email,
        role: wire.role,
        status: Status::from_wire(&wire.status)?,
        linked_on: parse_calendar_date(&wire.linked_on, "fechaVinculacion")?,
        url: wire.url.filter(|url| !url.is_empty()),
    })
}

impl TryFrom<WireUser> for User {
    type Error = NormalizeError;

    fn try_from(wire: WireUser) -> Result<Self, Self::Error> {
        normalize_user(wire, Utc::now().date_naive())
    }
}

/// The backend's object id wins over a plain `id`
fn canonical_id(object_id: Option<String>, id: Option<String>) -> Result<String, NormalizeError> {
    object_id
        .into_iter()
        .chain(id)
        .find(|id| !id.is_empty())
        .ok_or(NormalizeError::MissingField("_id"))
}

/// Keep the date part of an ISO-8601 timestamp
fn parse_calendar_date(raw: &str, field: &'static str) -> Result<NaiveDate, NormalizeError> {
    let date = raw.split('T').next().unwrap_or(raw).trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| NormalizeError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn wire(value: Value) -> WireUser {
        serde_json::from_value(value).unwrap()
    }

    fn minimal() -> Value {
        json!({
            "_id": "665f1c2ab9e4d1",
            "nombre": "Admin Sistema",
            "email": "admin@example.com",
            "rol": "admin",
            "estado": "activo"
        })
    }

    #[test]
    fn test_missing_collections_become_empty() {
        let user = normalize_user(wire(minimal()), today()).unwrap();
        assert!(user.permissions.is_empty());
        assert!(user.linked_accounts.is_empty());
    }

    #[test]
    fn test_created_at_is_truncated_to_date() {
        let mut value = minimal();
        value["createdAt"] = json!("2024-03-01T10:00:00Z");
        let user = normalize_user(wire(value), today()).unwrap();
        assert_eq!(user.created_on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_missing_created_at_defaults_to_today() {
        let user = normalize_user(wire(minimal()), today()).unwrap();
        assert_eq!(user.created_on, today());
    }

    #[test]
    fn test_object_id_preferred_over_id() {
        let mut value = minimal();
        value["id"] = json!("legacy-7");
        let user = normalize_user(wire(value), today()).unwrap();
        assert_eq!(user.id, "665f1c2ab9e4d1");

        let mut value = minimal();
        value.as_object_mut().unwrap().remove("_id");
        value["id"] = json!("admin-001");
        let user = normalize_user(wire(value), today()).unwrap();
        assert_eq!(user.id, "admin-001");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("_id");
        let err = normalize_user(wire(value), today()).unwrap_err();
        assert_eq!(err, NormalizeError::MissingField("_id"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut value = minimal();
        value["rol"] = json!("root");
        let err = normalize_user(wire(value), today()).unwrap_err();
        assert!(matches!(err, NormalizeError::Value(CoreError::UnknownVariant { .. })));
    }

    #[test]
    fn test_garbage_created_at_is_rejected() {
        let mut value = minimal();
        value["createdAt"] = json!("yesterday");
        let err = normalize_user(wire(value), today()).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDate { field: "createdAt", .. }));
    }

    #[test]
    fn test_linked_accounts_are_normalized() {
        let mut value = minimal();
        value["cuentasVinculadas"] = json!([{
            "_id": "acc-1",
            "plataforma": "Jira",
            "usuario": "admin.jira",
            "email": "admin@corp.com",
            "rol": "Project Admin",
            "estado": "inactivo",
            "fechaVinculacion": "2024-05-02T00:00:00.000Z",
            "url": ""
        }]);
        let user = normalize_user(wire(value), today()).unwrap();
        let account = user.linked_account("acc-1").unwrap();
        assert_eq!(account.platform, "Jira");
        assert_eq!(account.status, Status::Inactive);
        assert_eq!(account.linked_on, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert!(account.url.is_none());
    }
}
