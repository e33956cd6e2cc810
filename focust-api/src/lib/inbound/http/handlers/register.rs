use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::JwtTokenResponseData;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<JwtTokenResponseData>), ApiError> {
    let issued = state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(refresh_cookie(issued.refresh_token)),
        ApiSuccess::new(
            StatusCode::CREATED,
            JwtTokenResponseData {
                access_token: issued.access_token,
                user_id: issued.details.id,
            },
        ),
    ))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand::new(email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
