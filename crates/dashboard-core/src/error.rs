//! Domain errors

use thiserror::Error;

use crate::domain::ProductId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Bad form input. Nothing was sent to the remote service.
    #[error("{0}")]
    Validation(String),

    #[error("Incorrect username or password.")]
    InvalidCredentials,

    /// The request never completed (connect, timeout, broken body).
    #[error("Remote service unreachable: {0}")]
    Transport(String),

    /// The remote service answered with a non-2xx status.
    #[error("Remote service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from remote service: {0}")]
    Decode(String),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Another change to product {0} is still in progress")]
    MutationInFlight(ProductId),

    #[error("Deleting a product must be confirmed")]
    ConfirmationRequired,

    #[error("Admin role required")]
    Forbidden,

    #[error("Dashboard view is no longer open")]
    ViewDisposed,
}
