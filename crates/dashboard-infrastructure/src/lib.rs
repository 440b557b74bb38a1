//! # Dashboard Infrastructure
//! 
//! Remote Product Service adapters (HTTP implementations of the core ports).

pub mod remote;

pub use remote::{create_client, HttpProductRepository, HttpUserRepository, RemoteClient};
