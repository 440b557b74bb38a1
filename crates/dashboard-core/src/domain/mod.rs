//! # Dashboard Core - Domain Module
//! 
//! Domain entities for the product dashboard.

pub mod session;
pub mod product;

pub use session::{AdminGrant, Role, Session};
pub use product::{NumericInput, Product, ProductDraft, ProductForm, ProductId};
