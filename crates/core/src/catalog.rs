//! Well-known permission tags and suggested external platforms.
//!
//! Both lists are advisory. The backend accepts any permission tag and any
//! platform name.

/// A permission tag together with its operator-facing label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionInfo {
    pub tag: &'static str,
    pub label: &'static str,
}

pub const KNOWN_PERMISSIONS: &[PermissionInfo] = &[
    PermissionInfo {
        tag: "crear_usuario",
        label: "Create user",
    },
    PermissionInfo {
        tag: "editar_usuario",
        label: "Edit user",
    },
    PermissionInfo {
        tag: "eliminar_usuario",
        label: "Delete user",
    },
    PermissionInfo {
        tag: "ver_usuario",
        label: "View user",
    },
    PermissionInfo {
        tag: "ver_accesos",
        label: "View linked accounts",
    },
    PermissionInfo {
        tag: "gestionar_permisos",
        label: "Manage permissions",
    },
];

pub const SUGGESTED_PLATFORMS: &[&str] = &[
    "SAP",
    "Monday",
    "Vitex",
    "Salesforce",
    "Teams",
    "Jira",
    "Slack",
    "Other",
];

/// Look up a permission tag in the known catalog
pub fn permission(tag: &str) -> Option<&'static PermissionInfo> {
    KNOWN_PERMISSIONS.iter().find(|p| p.tag == tag)
}

pub fn is_suggested_platform(name: &str) -> bool {
    SUGGESTED_PLATFORMS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(name.trim()))
}
