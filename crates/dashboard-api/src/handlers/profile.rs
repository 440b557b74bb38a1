use axum::Json;
use serde::Serialize;

use dashboard_core::Session;

use crate::middleware::CurrentSession;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: Session,
    pub is_admin: bool,
}

/// GET /profile
pub async fn profile(CurrentSession(session): CurrentSession) -> Json<ApiResponse<ProfileResponse>> {
    Json(ApiResponse::success(ProfileResponse {
        is_admin: session.is_admin(),
        user: session,
    }))
}
