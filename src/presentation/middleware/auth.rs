use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Method, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use super::error::AppError;
use crate::domain::value_objects::Role;
use crate::presentation::handlers::AppState;

pub const NEED_AUTH_MESSAGE: &str = "Need auth";

/// Role resolved from the caller's session, available to handlers that ask
/// for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub role: Role,
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .copied()
            .ok_or_else(|| AppError::unauthorized(NEED_AUTH_MESSAGE))
    }
}

/// Methods that change catalog state and therefore need the admin role
pub fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Session gate for catalog routes.
///
/// No cookie, or a cookie the session store cannot resolve, is 401. A
/// mutating request from a non-admin session is 403.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = jar
        .get(&state.session.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthorized(NEED_AUTH_MESSAGE))?;

    let role = state.auth.get_session_value(&session_id).await.map_err(|e| {
        debug!("Session lookup failed: {}", e);
        AppError::unauthorized(NEED_AUTH_MESSAGE)
    })?;

    if is_mutating(request.method()) && !role.is_admin() {
        warn!("Role {} attempted {} {}", role, request.method(), request.uri().path());
        return Err(AppError::forbidden());
    }

    request.extensions_mut().insert(SessionContext { role });
    Ok(next.run(request).await)
}
