//! User repository trait (port)

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{Role, Session};
use crate::error::DomainError;

/// User record as listed by the remote service. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

impl UserRecord {
    /// Unknown roles fall back to the least-privileged one.
    pub fn into_session(self) -> Session {
        let role = Role::from_str(&self.role).unwrap_or_else(|| {
            warn!("Unknown role '{}' for user {}, treating as viewer", self.role, self.id);
            Role::Viewer
        });
        Session::new(self.id, self.username, role)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users matching both fields exactly, in service order.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Vec<UserRecord>, DomainError>;
}
