use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

pub const EMPTY_BEARER_MESSAGE: &str = "Received JWT Token with Empty Bearer Header";
pub const INVALID_TOKEN_MESSAGE: &str = "Received JWT Token is Invalid";
pub const UNKNOWN_USER_MESSAGE: &str =
    "Unable to find existing user with the email from received JWT Token";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
}

/// Middleware that resolves a bearer token to the calling user.
///
/// Requests without a `Bearer ` authorization pass through untouched. A
/// present token must be valid and name an existing user, otherwise the
/// request is answered here and never reaches the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&req) else {
        return Ok(next.run(req).await);
    };

    if token.trim().is_empty() {
        return Err(ApiError::BadRequest(EMPTY_BEARER_MESSAGE.to_string()));
    }

    let email = state
        .tokens
        .email_of(&token)
        .map_err(|e| {
            tracing::error!(error = %e, "Token validation unavailable");
            ApiError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| {
            tracing::warn!(uri = %req.uri(), "Rejected bearer token");
            ApiError::BadRequest(INVALID_TOKEN_MESSAGE.to_string())
        })?;

    let details = state
        .user_service
        .get_user_details(&email)
        .await
        .map_err(|e| match e {
            UserError::UserNotFound(_) => {
                tracing::warn!("Bearer token for unknown user");
                ApiError::BadRequest(UNKNOWN_USER_MESSAGE.to_string())
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        id: UserId(details.id),
        email: details.email,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::to_string)
}
