// ============================================================================
// Dashboard Infrastructure - HTTP Product Repository
// File: crates/dashboard-infrastructure/src/remote/product_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use dashboard_core::domain::{Product, ProductDraft, ProductId};
use dashboard_core::error::DomainError;
use dashboard_core::repositories::ProductRepository;

use super::connection::RemoteClient;

pub struct HttpProductRepository {
    remote: RemoteClient,
}

impl HttpProductRepository {
    pub fn new(remote: RemoteClient) -> Self {
        Self { remote }
    }
}

// Create payload; the service assigns the id.
#[derive(Debug, Serialize)]
struct NewProductBody<'a> {
    nama_produk: &'a str,
    harga_satuan: f64,
    quantity: f64,
}

impl<'a> From<&'a ProductDraft> for NewProductBody<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            nama_produk: &draft.name,
            harga_satuan: draft.unit_price,
            quantity: draft.quantity,
        }
    }
}

#[async_trait]
impl ProductRepository for HttpProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let request = self.remote.http().get(self.remote.url("/products"));
        let products: Vec<Product> = self.remote.send_json(request, "list products").await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, DomainError> {
        let request = self
            .remote
            .http()
            .post(self.remote.url("/products"))
            .json(&NewProductBody::from(draft));
        self.remote.send_json(request, "create product").await
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let request = self
            .remote
            .http()
            .put(self.remote.url(&format!("/products/{}", product.id)))
            .json(product);
        self.remote.send_json(request, "update product").await
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        let request = self
            .remote
            .http()
            .delete(self.remote.url(&format!("/products/{}", id)));
        self.remote.send(request, "delete product").await?;
        Ok(())
    }
}
