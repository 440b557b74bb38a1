//! Request middleware and session extractors

pub mod auth;

pub use auth::{auth_gate, AdminSession, CurrentSession, SessionContext};
