use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::OffsetDateTime;

use super::AppState;
use crate::application::dto::{SignInRequest, SignUpRequest, SignUpResponse};
use crate::domain::entities::User;
use crate::domain::errors::ValidationError;
use crate::infrastructure::config::SessionConfig;
use crate::presentation::middleware::error::{AppError, ErrorKind};
use crate::presentation::response::ApiResponse;

pub const NO_SESSION_MESSAGE: &str = "no session";

fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
    let expires = OffsetDateTime::now_utc() + time::Duration::days(i64::from(config.ttl_days));

    Cookie::build((config.cookie_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .expires(expires)
        .build()
}

/// `POST /api/auth/sign-up`: create a standard account and log it in
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiResponse<SignUpResponse>), AppError> {
    let Json(request) = body?;
    let user = User::try_from(request)?;
    let role = user.role();

    let id = state.auth.create_user(user).await?;
    let session_id = state.auth.generate_cookie(role).await?;

    let jar = jar.add(session_cookie(&state.session, session_id));
    Ok((jar, ApiResponse::success(SignUpResponse { id })))
}

/// `POST /api/auth/login`.
///
/// Unknown mail and wrong password both answer with the same 401.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiResponse<String>), AppError> {
    let Json(request) = body?;
    if request.mail.is_empty() {
        return Err(ValidationError::Required { field: "mail" }.into());
    }
    if request.password.is_empty() {
        return Err(ValidationError::Required { field: "password" }.into());
    }

    let user = state.auth.get_user(&request.mail, &request.password).await.map_err(|e| {
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::InvalidPassword => AppError::InvalidPassword,
            _ => e,
        }
    })?;

    let session_id = state.auth.generate_cookie(user.role()).await?;
    tracing::info!("User {} logged in with role {}", user.id(), user.role());

    let jar = jar.add(session_cookie(&state.session, session_id));
    Ok((jar, ApiResponse::success(String::new())))
}

/// `DELETE /api/auth/logout`: drop the session and expire the cookie
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<String>), AppError> {
    let session_id = jar
        .get(&state.session.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthorized(NO_SESSION_MESSAGE))?;

    state.auth.delete_cookie(&session_id).await?;

    let jar = jar.remove(Cookie::build((state.session.cookie_name.clone(), "")).path("/"));
    Ok((jar, ApiResponse::success(String::new())))
}
