use std::sync::Arc;
use std::time::Duration;

use dashboard_core::repositories::{ProductRepository, UserRepository};
use dashboard_core::services::{AuthService, GateRules};
use dashboard_security::{SessionError, SessionStore};
use dashboard_shared::config::AppConfig;

use crate::views::ViewRegistry;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<GateRules>,
    pub sessions: Arc<SessionStore>,
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub products: Arc<dyn ProductRepository>,
    pub views: Arc<ViewRegistry>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Result<Self, SessionError> {
        Ok(Self {
            gate: Arc::new(GateRules::default()),
            sessions: Arc::new(SessionStore::from_settings(&config.session)?),
            auth: Arc::new(AuthService::new(users)),
            products,
            views: Arc::new(ViewRegistry::new(
                Duration::from_secs(config.dashboard.view_ttl_secs),
                config.dashboard.max_views_per_owner,
            )),
        })
    }
}
