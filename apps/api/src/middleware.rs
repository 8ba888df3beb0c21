use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use rolegate_core::{AppError, UserIdentity};

use crate::error::ApiResult;

/// Header carrying the authenticated user id, set by the fronting proxy.
pub const USER_HEADER: &str = "x-rolegate-user";

/// Optional header carrying the authenticated user's display name.
pub const USER_NAME_HEADER: &str = "x-rolegate-user-name";

pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = actor_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn actor_from_headers(headers: &axum::http::HeaderMap) -> Result<UserIdentity, AppError> {
    let user_id = headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let display_name = headers
        .get(USER_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(user_id);

    Ok(UserIdentity::new(user_id, display_name))
}
