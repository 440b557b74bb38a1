//! Domain services (business logic)

pub mod auth_gate;
pub mod auth_service;
pub mod product_list;
pub mod role_view;

pub use auth_gate::{GateDecision, GateRules};
pub use auth_service::AuthService;
pub use product_list::{ListSnapshot, PendingOp, ProductListController};
pub use role_view::{Affordances, DashboardKpis, DashboardView};
