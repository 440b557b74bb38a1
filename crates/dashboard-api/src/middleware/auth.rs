use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use dashboard_core::services::GateDecision;
use dashboard_core::{AdminGrant, DomainError, Session};

use crate::error::ApiError;
use crate::state::AppState;

/// The session read from the cookie by [`auth_gate`], if any.
#[derive(Debug, Clone)]
pub struct SessionContext(pub Option<Session>);

/// Gate every request: protected paths need a session, the sign-in page
/// needs the absence of one.
///
/// Only page loads (GET) are redirected. Other methods pass through to the
/// sign-in handler or are refused with 401.
pub async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.sessions.current(&jar);
    let decision = state.gate.decide(request.uri().path(), session.is_some());
    let page_load = *request.method() == Method::GET;

    match decision {
        GateDecision::RedirectToSignin if page_load => {
            debug!("No session for {}, redirecting to sign-in", request.uri().path());
            Redirect::temporary(state.gate.signin_path()).into_response()
        }
        GateDecision::RedirectToSignin => {
            ApiError::Unauthorized("Sign in required.".to_string()).into_response()
        }
        GateDecision::RedirectToDashboard if page_load => {
            debug!("Already signed in, redirecting to dashboard");
            Redirect::temporary(state.gate.dashboard_path()).into_response()
        }
        GateDecision::RedirectToDashboard | GateDecision::Allow => {
            request.extensions_mut().insert(SessionContext(session));
            next.run(request).await
        }
    }
}

/// A signed-in user. Rejects with 401 when the gate found no session.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SessionContext>() {
            Some(SessionContext(Some(session))) => Ok(CurrentSession(session.clone())),
            _ => Err(ApiError::Unauthorized("Sign in required.".to_string())),
        }
    }
}

/// A signed-in admin together with the grant that unlocks mutations.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session: Session,
    pub grant: AdminGrant,
}

impl<S: Send + Sync> FromRequestParts<S> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        match session.admin_grant() {
            Some(grant) => Ok(AdminSession { session, grant }),
            None => {
                debug!("User {} ({}) attempted an admin action", session.id, session.username);
                Err(DomainError::Forbidden.into())
            }
        }
    }
}
