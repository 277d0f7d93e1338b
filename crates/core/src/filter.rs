//! Client-side narrowing of a fetched user list

use crate::types::{Role, Status, User};

/// Search and attribute filter over a list of users
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name and email
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub const fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
        });

        matches_search
            && self.role.is_none_or(|role| user.role == role)
            && self.status.is_none_or(|status| user.status == status)
    }

    /// Keep the users that match, preserving order
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

/// Short operator-facing code for a user.
///
/// With a list position the code is `USR#` plus the 1-based position padded to
/// three digits. Without one, long ids are shortened to their first six
/// characters upper-cased; short ids are returned as-is.
pub fn display_id(id: &str, index: Option<usize>) -> String {
    if let Some(index) = index {
        return format!("USR#{:03}", index + 1);
    }
    if id.chars().count() > 12 {
        let prefix: String = id.chars().take(6).collect();
        return format!("USR#{}", prefix.to_uppercase());
    }
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(name: &str, email: &str, role: Role, status: Status) -> User {
        User {
            id: format!("id-{name}"),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            permissions: vec![],
            phone: None,
            department: None,
            created_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            linked_accounts: vec![],
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("Ana Torres", "ana@corp.com", Role::Admin, Status::Active),
            user("Luis Pardo", "lpardo@corp.com", Role::Manager, Status::Inactive),
            user("Marta Ruiz", "marta@example.org", Role::RegularUser, Status::Active),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let users = users();
        assert_eq!(UserFilter::new().apply(&users).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_email() {
        let users = users();
        let by_name = UserFilter::new().search("ANA");
        assert_eq!(by_name.apply(&users).len(), 1);

        let by_email = UserFilter::new().search("corp.com");
        let names: Vec<_> = by_email.apply(&users).iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Torres", "Luis Pardo"]);
    }

    #[test]
    fn test_role_and_status_combine() {
        let users = users();
        let filter = UserFilter::new().search("corp").status(Status::Active);
        let matched = filter.apply(&users);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].role, Role::Admin);

        let filter = UserFilter::new().role(Role::Manager).status(Status::Active);
        assert!(filter.apply(&users).is_empty());
    }

    #[test]
    fn test_display_id() {
        assert_eq!(display_id("anything", Some(0)), "USR#001");
        assert_eq!(display_id("anything", Some(41)), "USR#042");
        assert_eq!(display_id("665f1c2ab9e4d1", None), "USR#665F1C");
        assert_eq!(display_id("admin-001", None), "admin-001");
    }
}
