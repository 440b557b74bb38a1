//! Dashboard page-view handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dashboard_core::services::{DashboardView, ProductListController};
use dashboard_core::{DomainError, Session};

use crate::error::ApiError;
use crate::middleware::CurrentSession;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::ViewId;

pub const LOAD_FAILED: &str = "Failed to load products.";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub query: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub view_id: ViewId,
    pub user: Session,
    pub view: DashboardView,
}

impl DashboardPage {
    pub fn render(view_id: ViewId, session: Session, list: &ProductListController) -> Self {
        Self {
            view_id,
            view: DashboardView::select(&session, list),
            user: session,
        }
    }
}

/// A changed query resets to page 1 before any requested page applies.
fn apply_params(list: &ProductListController, params: ListParams) {
    if let Some(query) = params.query {
        if query != list.query() {
            list.set_query(query);
        }
    }
    if let Some(page) = params.page {
        let applied = list.set_page(page);
        if applied != page {
            debug!("Requested page {} clamped to {}", page, applied);
        }
    }
}

pub(crate) fn view_of(
    state: &AppState,
    view_id: ViewId,
    session: &Session,
) -> Result<Arc<ProductListController>, ApiError> {
    state
        .views
        .get(view_id, session.id)
        .ok_or_else(|| ApiError::NotFound(format!("Dashboard view {} not found", view_id)))
}

/// GET /dashboard
///
/// A failed product fetch still opens the view, with an empty mirror and
/// the load-failure notice.
pub async fn open_dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<DashboardPage>>, ApiError> {
    let (list, notice) = match ProductListController::load(state.products.clone()).await {
        Ok(list) => (list, None),
        Err(
            err @ (DomainError::Transport(_) | DomainError::Rejected { .. } | DomainError::Decode(_)),
        ) => {
            warn!("{} ({})", LOAD_FAILED, err);
            (ProductListController::new(state.products.clone(), Vec::new()), Some(LOAD_FAILED))
        }
        Err(err) => return Err(err.into()),
    };
    apply_params(&list, params);

    let (view_id, list) = state.views.open(session.id, list);
    let page = DashboardPage::render(view_id, session, &list);
    Ok(Json(match notice {
        Some(notice) => ApiResponse::success_with_message(page, notice),
        None => ApiResponse::success(page),
    }))
}

/// GET /dashboard/views/{view_id}
pub async fn show_view(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(view_id): Path<ViewId>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<DashboardPage>>, ApiError> {
    let list = view_of(&state, view_id, &session)?;
    apply_params(&list, params);
    Ok(Json(ApiResponse::success(DashboardPage::render(view_id, session, &list))))
}

/// DELETE /dashboard/views/{view_id}
pub async fn dispose_view(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(view_id): Path<ViewId>,
) -> Result<StatusCode, ApiError> {
    if state.views.dispose(view_id, session.id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Dashboard view {} not found", view_id)))
    }
}
