//! Sign-in and logout handlers

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use dashboard_core::Session;

use crate::error::{ApiError, SERVER_UNREACHABLE};
use crate::response::ApiResponse;
use crate::state::AppState;

pub const LOGGED_OUT: &str = "You have been logged out.";

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// What the sign-in form posts and where.
#[derive(Debug, Serialize)]
pub struct SigninPage {
    pub action: &'static str,
    pub method: &'static str,
    pub fields: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct SignedIn {
    pub user: Session,
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
pub struct SignedOut {
    pub redirect_to: String,
}

/// GET /signin
pub async fn signin_page() -> Json<ApiResponse<SigninPage>> {
    Json(ApiResponse::success(SigninPage {
        action: "/signin",
        method: "POST",
        fields: ["username", "password"],
    }))
}

/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SigninRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SignedIn>>), ApiError> {
    let session = state
        .auth
        .sign_in(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::with_notice(e, SERVER_UNREACHABLE))?;

    let jar = state
        .sessions
        .establish(jar, &session)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    info!("User {} signed in as {}", session.username, session.role.as_str());
    let message = format!("Welcome back, {}!", session.username);
    Ok((
        jar,
        Json(ApiResponse::success_with_message(
            SignedIn {
                user: session,
                redirect_to: state.gate.dashboard_path().to_string(),
            },
            message,
        )),
    ))
}

/// POST /logout
///
/// Always succeeds; open page views of the departing user are disposed.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<SignedOut>>) {
    if let Some(session) = state.sessions.current(&jar) {
        let disposed = state.views.dispose_owned_by(session.id);
        info!("User {} logged out ({} views disposed)", session.username, disposed);
    }

    (
        state.sessions.clear(jar),
        Json(ApiResponse::success_with_message(
            SignedOut {
                redirect_to: state.gate.signin_path().to_string(),
            },
            LOGGED_OUT,
        )),
    )
}
