//! Session authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::AppState;

/// Value of cookie `name` from the `Cookie` headers
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Session token from the session cookie, else an `Authorization: Bearer` header
pub fn extract_session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    cookie_value(headers, cookie_name).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Authentication middleware
///
/// Validates the session with the auth provider and injects the
/// [`SessionUser`](crate::domain::entities::SessionUser) into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(request.headers(), &state.config.session_cookie)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = match state.sessions.verify(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::Unauthorized),
        Err(e) => {
            tracing::warn!(error = %e, "Session verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
