//! Session cookie value encoding

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use dashboard_core::Session;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session encoding failed: {0}")]
    EncodeError(String),
    #[error("Invalid signing key: {0}")]
    KeyError(String),
}

/// Turns a session into a cookie value and back.
///
/// `decode` fails soft: any malformed, forged or expired value is `None`.
pub trait SessionCodec: Send + Sync {
    fn encode(&self, session: &Session, expires_at: i64) -> Result<String, SessionError>;
    fn decode(&self, raw: &str, now: i64) -> Option<Session>;
}

/// The wire contract as-is: JSON `{id, username, role}`, unprotected.
///
/// Expiry is left to the cookie's own Max-Age.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCodec;

impl SessionCodec for PlainCodec {
    fn encode(&self, session: &Session, _expires_at: i64) -> Result<String, SessionError> {
        serde_json::to_string(session).map_err(|e| SessionError::EncodeError(e.to_string()))
    }

    fn decode(&self, raw: &str, _now: i64) -> Option<Session> {
        serde_json::from_str(raw)
            .map_err(|e| debug!("Discarding unreadable session cookie: {}", e))
            .ok()
    }
}

#[derive(Serialize, Deserialize)]
struct SignedPayload {
    #[serde(flatten)]
    session: Session,
    exp: i64,
}

/// `base64url(json).hex(hmac_sha256(base64url(json)))`, with the absolute
/// expiry inside the signed JSON.
#[derive(Clone)]
pub struct SignedCodec {
    keyed: HmacSha256,
}

impl SignedCodec {
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, SessionError> {
        let keyed = HmacSha256::new_from_slice(key.as_ref())
            .map_err(|e| SessionError::KeyError(e.to_string()))?;
        Ok(Self { keyed })
    }

    fn mac(&self) -> HmacSha256 {
        self.keyed.clone()
    }
}

impl SessionCodec for SignedCodec {
    fn encode(&self, session: &Session, expires_at: i64) -> Result<String, SessionError> {
        let payload = SignedPayload {
            session: session.clone(),
            exp: expires_at,
        };
        let json =
            serde_json::to_vec(&payload).map_err(|e| SessionError::EncodeError(e.to_string()))?;
        let body = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", body, signature))
    }

    fn decode(&self, raw: &str, now: i64) -> Option<Session> {
        let (body, signature) = raw.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Discarding session cookie with bad signature");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(body).ok()?;
        let payload: SignedPayload = serde_json::from_slice(&json).ok()?;
        if payload.exp <= now {
            debug!("Discarding expired session cookie for user {}", payload.session.id);
            return None;
        }
        Some(payload.session)
    }
}
