//! Admin-only product mutations against an open dashboard view

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use dashboard_core::{Product, ProductForm, ProductId};

use crate::error::ApiError;
use crate::handlers::dashboard::{view_of, DashboardPage};
use crate::middleware::AdminSession;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::views::ViewId;

pub const SAVE_FAILED: &str = "Failed to process product data.";
pub const DELETE_FAILED: &str = "Failed to delete product.";

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct MutationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub page: DashboardPage,
}

/// POST /dashboard/views/{view_id}/products
pub async fn create_product(
    State(state): State<AppState>,
    AdminSession { session, grant }: AdminSession,
    Path(view_id): Path<ViewId>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<ApiResponse<MutationResult>>), ApiError> {
    let list = view_of(&state, view_id, &session)?;
    let product = list
        .create(&grant, form)
        .await
        .map_err(|e| ApiError::with_notice(e, SAVE_FAILED))?;

    let page = DashboardPage::render(view_id, session, &list);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            MutationResult { product: Some(product), page },
            "Product added successfully!",
        )),
    ))
}

/// PUT /dashboard/views/{view_id}/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    AdminSession { session, grant }: AdminSession,
    Path((view_id, id)): Path<(ViewId, ProductId)>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ApiResponse<MutationResult>>, ApiError> {
    let list = view_of(&state, view_id, &session)?;
    let product = list
        .update(&grant, id, form)
        .await
        .map_err(|e| ApiError::with_notice(e, SAVE_FAILED))?;

    let page = DashboardPage::render(view_id, session, &list);
    Ok(Json(ApiResponse::success_with_message(
        MutationResult { product: Some(product), page },
        "Product updated successfully!",
    )))
}

/// DELETE /dashboard/views/{view_id}/products/{id}?confirm=true
pub async fn delete_product(
    State(state): State<AppState>,
    AdminSession { session, grant }: AdminSession,
    Path((view_id, id)): Path<(ViewId, ProductId)>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<MutationResult>>, ApiError> {
    let list = view_of(&state, view_id, &session)?;
    list.remove(&grant, id, params.confirm)
        .await
        .map_err(|e| ApiError::with_notice(e, DELETE_FAILED))?;

    let page = DashboardPage::render(view_id, session, &list);
    Ok(Json(ApiResponse::success_with_message(
        MutationResult { product: None, page },
        "Product deleted successfully.",
    )))
}
