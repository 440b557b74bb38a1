//! Application-wide constants

/// Rows per dashboard page. Fixed, not configurable.
pub const PAGE_SIZE: usize = 5;

pub const SESSION_COOKIE_NAME: &str = "user-data";
/// One day.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

pub const SIGNIN_PATH: &str = "/signin";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/profile";

pub const DEFAULT_REMOTE_BASE_URL: &str = "http://localhost:5050";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VIEW_TTL_SECS: u64 = 1_800;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
/// Open dashboard views kept per user; the least recently used goes first.
pub const DEFAULT_MAX_VIEWS_PER_OWNER: u64 = 5;
