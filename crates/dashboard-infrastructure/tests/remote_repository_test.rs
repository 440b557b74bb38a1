//! Remote adapters against a mocked Remote Product Service

use dashboard_core::domain::{Product, ProductDraft, ProductForm};
use dashboard_core::error::DomainError;
use dashboard_core::repositories::{ProductRepository, UserRepository};
use dashboard_infrastructure::{create_client, HttpProductRepository, HttpUserRepository, RemoteClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote(server: &MockServer) -> RemoteClient {
    RemoteClient::new(create_client(5).unwrap(), format!("{}/", server.uri()))
}

fn draft(name: &str, price: f64, qty: f64) -> ProductDraft {
    ProductDraft::try_from(ProductForm::new(name, price, qty)).unwrap()
}

#[tokio::test]
async fn test_list_products_maps_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "nama_produk": "Pen", "harga_satuan": 10, "quantity": 5},
            {"id": 2, "nama_produk": "Buku Tulis", "harga_satuan": 3500.5, "quantity": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = HttpProductRepository::new(remote(&server));
    let products = repo.list().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Pen");
    assert_eq!(products[1].unit_price, 3500.5);
}

#[tokio::test]
async fn test_create_posts_payload_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({"nama_produk": "Pensil", "harga_satuan": 2500.0, "quantity": 10.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(
            {"id": 7, "nama_produk": "Pensil", "harga_satuan": 2500, "quantity": 10}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let repo = HttpProductRepository::new(remote(&server));
    let created = repo.create(&draft("Pensil", 2500.0, 10.0)).await.unwrap();
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn test_update_puts_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/3"))
        .and(body_json(json!({"id": 3, "nama_produk": "Spidol", "harga_satuan": 7000.0, "quantity": 6.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 3, "nama_produk": "Spidol", "harga_satuan": 7000, "quantity": 6}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let repo = HttpProductRepository::new(remote(&server));
    let product = Product::from_draft(3, draft("Spidol", 7000.0, 6.0));
    assert_eq!(repo.update(&product).await.unwrap(), product);
}

#[tokio::test]
async fn test_delete_and_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/5"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let repo = HttpProductRepository::new(remote(&server));
    assert!(repo.delete(4).await.is_ok());
    assert_eq!(
        repo.delete(5).await,
        Err(DomainError::Rejected {
            status: 404,
            message: "Not Found".into()
        })
    );
}

#[tokio::test]
async fn test_unreadable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let repo = HttpProductRepository::new(remote(&server));
    assert!(matches!(repo.list().await, Err(DomainError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let repo = HttpProductRepository::new(RemoteClient::new(
        create_client(1).unwrap(),
        "http://127.0.0.1:1",
    ));
    assert!(matches!(repo.list().await, Err(DomainError::Transport(_))));
}

#[tokio::test]
async fn test_credential_lookup_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("username", "admin"))
        .and(query_param("password", "s3cret&x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "admin", "password": "s3cret&x", "role": "admin"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = HttpUserRepository::new(remote(&server));
    let users = repo.find_by_credentials("admin", "s3cret&x").await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, "admin");
}

#[tokio::test]
async fn test_credential_lookup_without_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repo = HttpUserRepository::new(remote(&server));
    assert!(repo.find_by_credentials("x", "y").await.unwrap().is_empty());
}
