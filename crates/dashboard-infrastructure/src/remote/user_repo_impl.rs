// ============================================================================
// Dashboard Infrastructure - HTTP User Repository
// File: crates/dashboard-infrastructure/src/remote/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use dashboard_core::error::DomainError;
use dashboard_core::repositories::{UserRecord, UserRepository};

use super::connection::RemoteClient;

pub struct HttpUserRepository {
    remote: RemoteClient,
}

impl HttpUserRepository {
    pub fn new(remote: RemoteClient) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Vec<UserRecord>, DomainError> {
        let request = self
            .remote
            .http()
            .get(self.remote.url("/users"))
            .query(&[("username", username), ("password", password)]);
        let users: Vec<UserRecord> = self.remote.send_json(request, "credential lookup").await?;
        debug!("Credential lookup for {} matched {} user(s)", username, users.len());
        Ok(users)
    }
}
