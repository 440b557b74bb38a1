//! Remote Product Service module (reqwest adapters)

pub mod connection;
pub mod product_repo_impl;
pub mod user_repo_impl;

pub use connection::{create_client, RemoteClient};
pub use product_repo_impl::HttpProductRepository;
pub use user_repo_impl::HttpUserRepository;
