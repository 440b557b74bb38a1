//! Cookie-backed session store
//!
//! No server-side session table: the identity lives entirely in the
//! `user-data` cookie and is trusted until the cookie expires.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use tracing::{info, warn};

use dashboard_core::Session;
use dashboard_shared::config::SessionSettings;

use crate::codec::{PlainCodec, SessionCodec, SessionError, SignedCodec};

pub struct SessionStore {
    cookie_name: String,
    ttl_secs: i64,
    secure: bool,
    codec: Box<dyn SessionCodec>,
}

impl SessionStore {
    pub fn new(
        cookie_name: impl Into<String>,
        ttl_secs: i64,
        secure: bool,
        codec: Box<dyn SessionCodec>,
    ) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl_secs,
            secure,
            codec,
        }
    }

    /// Signed cookies when a signing key is configured, the plain JSON contract otherwise.
    pub fn from_settings(settings: &SessionSettings) -> Result<Self, SessionError> {
        let codec: Box<dyn SessionCodec> = match &settings.signing_key {
            Some(key) => Box::new(SignedCodec::new(key)?),
            None => {
                warn!("session.signing_key not set: session cookies are not integrity-protected");
                Box::new(PlainCodec)
            }
        };
        Ok(Self::new(
            settings.cookie_name.clone(),
            settings.ttl_secs,
            settings.secure,
            codec,
        ))
    }

    /// Writes the session cookie with a fixed TTL, replacing any prior one.
    pub fn establish(&self, jar: CookieJar, session: &Session) -> Result<CookieJar, SessionError> {
        let expires_at = Utc::now().timestamp() + self.ttl_secs;
        let value = self.codec.encode(session, expires_at)?;

        let cookie = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(self.ttl_secs));

        info!("Session established for user {} ({})", session.id, session.username);
        Ok(jar.add(cookie))
    }

    /// The stored session, or `None` if missing or unreadable.
    pub fn current(&self, jar: &CookieJar) -> Option<Session> {
        let cookie = jar.get(&self.cookie_name)?;
        self.codec.decode(cookie.value(), Utc::now().timestamp())
    }

    /// Removes the session cookie (logout).
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::Role;

    fn plain_store() -> SessionStore {
        SessionStore::new("user-data", 86_400, false, Box::new(PlainCodec))
    }

    #[test]
    fn test_establish_then_current() {
        let store = plain_store();
        let session = Session::new(1, "admin", Role::Admin);
        let jar = store.establish(CookieJar::new(), &session).unwrap();

        let cookie = jar.get("user-data").unwrap();
        assert_eq!(cookie.value(), r#"{"id":1,"username":"admin","role":"admin"}"#);
        assert_eq!(cookie.max_age(), Some(time::Duration::days(1)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(store.current(&jar), Some(session));
    }

    #[test]
    fn test_establish_overwrites_prior_session() {
        let store = plain_store();
        let jar = store
            .establish(CookieJar::new(), &Session::new(1, "admin", Role::Admin))
            .unwrap();
        let jar = store
            .establish(jar, &Session::new(2, "budi", Role::Viewer))
            .unwrap();
        assert_eq!(store.current(&jar).map(|s| s.id), Some(2));
    }

    #[test]
    fn test_current_fails_soft() {
        let store = plain_store();
        assert_eq!(store.current(&CookieJar::new()), None);

        let jar = CookieJar::new().add(Cookie::new("user-data", "{broken"));
        assert_eq!(store.current(&jar), None);
    }

    #[test]
    fn test_clear_removes_session() {
        let store = plain_store();
        let jar = store
            .establish(CookieJar::new(), &Session::new(1, "admin", Role::Admin))
            .unwrap();
        let jar = store.clear(jar);
        assert_eq!(store.current(&jar), None);
    }

    #[test]
    fn test_signed_store_round_trip() {
        let store = SessionStore::new(
            "user-data",
            60,
            true,
            Box::new(SignedCodec::new("0123456789abcdef0123456789abcdef").unwrap()),
        );
        let session = Session::new(5, "sari", Role::Viewer);
        let jar = store.establish(CookieJar::new(), &session).unwrap();

        assert_eq!(jar.get("user-data").unwrap().secure(), Some(true));
        assert_eq!(store.current(&jar), Some(session));
    }
}
