use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JwtTokenResponseData;
use crate::domain::auth::models::SignInCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<JwtTokenResponseData>), ApiError> {
    let issued = state
        .auth_service
        .sign_in(SignInCommand::new(body.email, body.password))
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(refresh_cookie(issued.refresh_token)),
        ApiSuccess::new(
            StatusCode::OK,
            JwtTokenResponseData {
                access_token: issued.access_token,
                user_id: issued.details.id,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
