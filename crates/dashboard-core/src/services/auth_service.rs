// ============================================================================
// Dashboard Core - Authentication Service
// File: crates/dashboard-core/src/services/auth_service.rs
// ============================================================================
//! Sign-in by credential lookup against the remote user list

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::Session;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub const CREDENTIALS_REQUIRED: &str = "Username and password cannot be empty.";

/// Authentication service for the sign-in flow.
///
/// The remote service does the actual credential comparison; this only
/// turns its answer into a session identity.
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Sign in with username and password, both sent exactly as typed.
    /// The first matching user wins.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(CREDENTIALS_REQUIRED.into()));
        }

        info!("Sign-in attempt for username: {}", username);

        let user = self
            .user_repo
            .find_by_credentials(username, password)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("Sign-in failed for username: {}", username);
                DomainError::InvalidCredentials
            })?;

        let session = user.into_session();
        info!("Sign-in successful for: {} (role: {})", session.username, session.role.as_str());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::{MockUserRepository, UserRecord};

    fn record(id: i64, username: &str, role: &str) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_match_becomes_session() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .withf(|u, p| u == "admin" && p == "secret")
            .times(1)
            .returning(|_, _| Ok(vec![record(1, "admin", "admin"), record(9, "admin", "user")]));

        let service = AuthService::new(Arc::new(repo));
        let session = service.sign_in("admin", "secret").await.unwrap();
        assert_eq!(session, Session::new(1, "admin", Role::Admin));
    }

    #[tokio::test]
    async fn test_username_is_sent_as_typed() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .withf(|u, p| u == " admin " && p == "secret")
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let service = AuthService::new(Arc::new(repo));
        assert_eq!(
            service.sign_in(" admin ", "secret").await,
            Err(DomainError::InvalidCredentials)
        );

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .withf(|u, _| u == "   ")
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let service = AuthService::new(Arc::new(repo));
        assert_eq!(service.sign_in("   ", "x").await, Err(DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_no_match_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials().returning(|_, _| Ok(Vec::new()));

        let service = AuthService::new(Arc::new(repo));
        assert_eq!(
            service.sign_in("budi", "wrong").await,
            Err(DomainError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_the_service() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials().never();

        let service = AuthService::new(Arc::new(repo));
        assert!(matches!(service.sign_in("", "x").await, Err(DomainError::Validation(_))));
        assert!(matches!(service.sign_in("budi", "").await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_role_downgrades_to_viewer() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .returning(|_, _| Ok(vec![record(3, "sari", "superuser")]));

        let service = AuthService::new(Arc::new(repo));
        let session = service.sign_in("sari", "pw").await.unwrap();
        assert_eq!(session.role, Role::Viewer);
        assert!(session.admin_grant().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_passed_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials()
            .returning(|_, _| Err(DomainError::Transport("connection refused".into())));

        let service = AuthService::new(Arc::new(repo));
        assert!(matches!(
            service.sign_in("budi", "pw").await,
            Err(DomainError::Transport(_))
        ));
    }
}
