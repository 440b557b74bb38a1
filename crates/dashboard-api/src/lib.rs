//! # Dashboard API
//! 
//! HTTP handlers, auth-gate middleware, page-view registry and response envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use routes::{build_router, cors_layer};
pub use state::AppState;
