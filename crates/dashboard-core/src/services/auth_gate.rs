//! Route protection based on session presence

use dashboard_shared::constants::{DASHBOARD_PATH, PROFILE_PATH, SIGNIN_PATH};

/// Outcome of gating one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToSignin,
    RedirectToDashboard,
}

/// Which paths need a session, and where to send people.
///
/// Presence-based only: the gate never looks at the session's content.
#[derive(Debug, Clone)]
pub struct GateRules {
    protected: Vec<String>,
    signin: String,
    dashboard: String,
}

impl Default for GateRules {
    fn default() -> Self {
        Self::new([DASHBOARD_PATH, PROFILE_PATH], SIGNIN_PATH, DASHBOARD_PATH)
    }
}

impl GateRules {
    pub fn new<I, S>(protected: I, signin: impl Into<String>, dashboard: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protected: protected.into_iter().map(Into::into).collect(),
            signin: signin.into(),
            dashboard: dashboard.into(),
        }
    }

    pub fn signin_path(&self) -> &str {
        &self.signin
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| under(path, prefix))
    }

    pub fn decide(&self, path: &str, has_session: bool) -> GateDecision {
        if !has_session && self.is_protected(path) {
            return GateDecision::RedirectToSignin;
        }
        if has_session && under(path, &self.signin) {
            return GateDecision::RedirectToDashboard;
        }
        GateDecision::Allow
    }
}

/// `path` equals `prefix` or lies below it; `/dashboards` is not under `/dashboard`.
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths_without_session_redirect_to_signin() {
        let rules = GateRules::default();
        for path in ["/dashboard", "/dashboard/", "/dashboard/views/abc/products/1", "/profile"] {
            assert_eq!(rules.decide(path, false), GateDecision::RedirectToSignin, "{}", path);
        }
    }

    #[test]
    fn test_protected_paths_with_session_allow() {
        let rules = GateRules::default();
        for path in ["/dashboard", "/dashboard/views/abc", "/profile"] {
            assert_eq!(rules.decide(path, true), GateDecision::Allow, "{}", path);
        }
    }

    #[test]
    fn test_signin_with_session_redirects_to_dashboard() {
        let rules = GateRules::default();
        assert_eq!(rules.decide("/signin", true), GateDecision::RedirectToDashboard);
        assert_eq!(rules.decide("/signin", false), GateDecision::Allow);
    }

    #[test]
    fn test_public_and_lookalike_paths_allowed() {
        let rules = GateRules::default();
        assert_eq!(rules.decide("/health", false), GateDecision::Allow);
        assert_eq!(rules.decide("/dashboards", false), GateDecision::Allow);
        assert_eq!(rules.decide("/logout", true), GateDecision::Allow);
        assert_eq!(rules.decide("/", false), GateDecision::Allow);
    }
}
