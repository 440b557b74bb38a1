//! # Dashboard Security
//! 
//! Session cookie handling: codecs and the cookie-backed session store.

pub mod codec;
pub mod session;

pub use codec::{PlainCodec, SessionCodec, SessionError, SignedCodec};
pub use session::SessionStore;
