use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::JwtTokenResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::cookies::REFRESH_COOKIE_NAME;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Exchange the refresh cookie for a new access token.
///
/// The incoming cookie is sent back unchanged.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<JwtTokenResponseData>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::from(UserError::InvalidRefresh))?;

    let refreshed = state
        .auth_service
        .refresh(&refresh_token)
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(refresh_cookie(refresh_token)),
        ApiSuccess::new(
            StatusCode::OK,
            JwtTokenResponseData {
                access_token: refreshed.access_token,
                user_id: refreshed.details.id,
            },
        ),
    ))
}
