//! Role-based selection between the admin and read-only dashboards

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{Product, Role, Session};
use crate::services::product_list::{ListSnapshot, ProductListController};

/// Aggregates over every item in the mirror, not just the visible page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardKpis {
    pub total_products: usize,
    pub total_stock_value: f64,
    pub categories: usize,
}

impl DashboardKpis {
    pub fn from_items(items: &[Product]) -> Self {
        Self {
            total_products: items.len(),
            total_stock_value: items.iter().map(Product::stock_value).sum(),
            categories: items.iter().map(Product::category).collect::<HashSet<_>>().len(),
        }
    }
}

/// What the rendered table lets the user do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub create: bool,
    pub update: bool,
    pub remove: bool,
}

impl Affordances {
    pub const EDITABLE: Self = Self { create: true, update: true, remove: true };
    pub const READ_ONLY: Self = Self { create: false, update: false, remove: false };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DashboardView {
    Admin {
        kpis: DashboardKpis,
        affordances: Affordances,
        list: ListSnapshot,
    },
    ReadOnly {
        affordances: Affordances,
        list: ListSnapshot,
    },
}

impl DashboardView {
    /// Both roles get search and pagination; only admins get mutations and KPIs.
    pub fn select(session: &Session, list: &ProductListController) -> Self {
        match session.role {
            Role::Admin => DashboardView::Admin {
                kpis: DashboardKpis::from_items(&list.items()),
                affordances: Affordances::EDITABLE,
                list: list.snapshot(),
            },
            Role::Viewer => DashboardView::ReadOnly {
                affordances: Affordances::READ_ONLY,
                list: list.snapshot(),
            },
        }
    }

    pub fn affordances(&self) -> Affordances {
        match self {
            DashboardView::Admin { affordances, .. } | DashboardView::ReadOnly { affordances, .. } => {
                *affordances
            }
        }
    }

    pub fn list(&self) -> &ListSnapshot {
        match self {
            DashboardView::Admin { list, .. } | DashboardView::ReadOnly { list, .. } => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockProductRepository;
    use std::sync::Arc;

    fn product(id: i64, name: &str, price: f64, qty: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            unit_price: price,
            quantity: qty,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Pen Biru", 2500.0, 10.0),
            product(2, "Pen Hitam", 2500.0, 4.0),
            product(3, "Buku Tulis", 5000.0, 2.0),
            product(4, "Kertas A4", 45000.0, 1.0),
            product(5, "Buku Gambar", 8000.0, 3.0),
            product(6, "Spidol", 7000.0, 6.0),
        ]
    }

    #[test]
    fn test_kpis_cover_all_items() {
        let kpis = DashboardKpis::from_items(&sample());
        assert_eq!(kpis.total_products, 6);
        assert_eq!(kpis.total_stock_value, 25000.0 + 10000.0 + 10000.0 + 45000.0 + 24000.0 + 42000.0);
        // Pen, Buku, Kertas, Spidol
        assert_eq!(kpis.categories, 4);
    }

    #[test]
    fn test_admin_gets_editable_view_with_kpis() {
        let list = ProductListController::new(Arc::new(MockProductRepository::new()), sample());
        list.set_query("pen");
        let view = DashboardView::select(&Session::new(1, "root", Role::Admin), &list);

        match &view {
            DashboardView::Admin { kpis, list, .. } => {
                assert_eq!(kpis.total_products, 6);
                assert_eq!(list.total_filtered, 2);
            }
            other => panic!("expected admin view, got {:?}", other),
        }
        assert_eq!(view.affordances(), Affordances::EDITABLE);
    }

    #[test]
    fn test_viewer_gets_read_only_paginated_view() {
        let list = ProductListController::new(Arc::new(MockProductRepository::new()), sample());
        let view = DashboardView::select(&Session::new(2, "budi", Role::Viewer), &list);

        assert!(matches!(view, DashboardView::ReadOnly { .. }));
        assert_eq!(view.affordances(), Affordances::READ_ONLY);
        assert_eq!(view.list().visible.len(), 5);
        assert_eq!(view.list().page_count, 2);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mode"], "read_only");
        assert!(json.get("kpis").is_none());
    }
}
