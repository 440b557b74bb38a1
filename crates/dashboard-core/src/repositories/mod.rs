//! Repository traits (ports)

pub mod user_repository;
pub mod product_repository;

pub use user_repository::{UserRecord, UserRepository};
pub use product_repository::ProductRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
