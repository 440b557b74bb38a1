//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_MAX_VIEWS_PER_OWNER, DEFAULT_REMOTE_BASE_URL, DEFAULT_REMOTE_TIMEOUT_SECS,
    DEFAULT_SESSION_TTL_SECS, DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_VIEW_TTL_SECS,
    SESSION_COOKIE_NAME,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub remote: RemoteSettings,
    pub session: SessionSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Browser origins allowed to call the API with credentials.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Remote Product Service (the REST API that owns users and products).
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_secs: i64,
    /// When set, the session cookie is HMAC-signed instead of plain JSON.
    pub signing_key: Option<String>,
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub view_ttl_secs: u64,
    pub sweep_interval_secs: u64,
    pub max_views_per_owner: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        tracing::debug!("Loading configuration for environment '{}'", env);
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder pre-seeded with every default, so each source on top is optional.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 3000)?
            .set_default("app.name", "dashboard-server")?
            .set_default("remote.base_url", DEFAULT_REMOTE_BASE_URL)?
            .set_default("remote.timeout_secs", DEFAULT_REMOTE_TIMEOUT_SECS)?
            .set_default("session.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("session.ttl_secs", DEFAULT_SESSION_TTL_SECS)?
            .set_default("session.secure", false)?
            .set_default("dashboard.view_ttl_secs", DEFAULT_VIEW_TTL_SECS)?
            .set_default("dashboard.sweep_interval_secs", DEFAULT_SWEEP_INTERVAL_SECS)?
            .set_default("dashboard.max_views_per_owner", DEFAULT_MAX_VIEWS_PER_OWNER)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.remote.base_url.trim().is_empty() {
            return Err(AppError::InvalidConfig("remote.base_url must not be empty".into()));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("session.cookie_name must not be empty".into()));
        }
        if self.session.ttl_secs <= 0 {
            return Err(AppError::InvalidConfig("session.ttl_secs must be positive".into()));
        }
        if matches!(&self.session.signing_key, Some(key) if key.len() < 32) {
            return Err(AppError::InvalidConfig(
                "session.signing_key must be at least 32 bytes".into(),
            ));
        }
        if self.dashboard.max_views_per_owner == 0 {
            return Err(AppError::InvalidConfig(
                "dashboard.max_views_per_owner must be positive".into(),
            ));
        }
        if self.dashboard.sweep_interval_secs == 0 {
            return Err(AppError::InvalidConfig(
                "dashboard.sweep_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Remote base URL without a trailing slash.
    pub fn remote_base_url(&self) -> &str {
        self.remote.base_url.trim_end_matches('/')
    }
}
