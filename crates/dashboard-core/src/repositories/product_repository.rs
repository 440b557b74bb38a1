//! Product repository trait (port)

use async_trait::async_trait;

use crate::domain::{Product, ProductDraft, ProductId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, DomainError>;
    /// The service assigns the id of the returned record.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, DomainError>;
    async fn update(&self, product: &Product) -> Result<Product, DomainError>;
    async fn delete(&self, id: ProductId) -> Result<(), DomainError>;
}
