// ============================================================================
// Dashboard Core - Session Identity
// File: crates/dashboard-core/src/domain/session.rs
// Description: Signed-in identity carried by the session cookie, and roles
// ============================================================================

use serde::{Deserialize, Serialize};

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "user")]
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::Viewer),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Viewer
    }
}

/// Identity record stored in the session cookie: `{id, username, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Mutation capability. Only admin sessions can mint one.
    pub fn admin_grant(&self) -> Option<AdminGrant> {
        match self.role {
            Role::Admin => Some(AdminGrant { user_id: self.id }),
            Role::Viewer => None,
        }
    }
}

/// Proof that the caller holds an admin session.
///
/// Every mutating list operation takes one, so a viewer session has no path
/// to create, update or remove even when calling the controller directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGrant {
    user_id: i64,
}

impl AdminGrant {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_spelling() {
        let session = Session::new(7, "budi", Role::Viewer);
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"id":7,"username":"budi","role":"user"}"#);

        let admin: Session =
            serde_json::from_str(r#"{"id":1,"username":"root","role":"admin"}"#).unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_rejected_by_serde() {
        let parsed = serde_json::from_str::<Session>(r#"{"id":1,"username":"x","role":"owner"}"#);
        assert!(parsed.is_err());
        assert_eq!(Role::from_str("owner"), None);
    }

    #[test]
    fn test_only_admin_gets_grant() {
        assert!(Session::new(1, "root", Role::Admin).admin_grant().is_some());
        assert!(Session::new(2, "budi", Role::Viewer).admin_grant().is_none());
        assert_eq!(
            Session::new(1, "root", Role::Admin).admin_grant().map(|g| g.user_id()),
            Some(1)
        );
    }
}
