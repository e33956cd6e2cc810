use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::NonSensitiveUserView;
use crate::user::errors::UserError;

pub mod get_user;
pub mod list_users;
pub mod login;
pub mod refresh;
pub mod register;

/// Body of every 500 response; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong while processing the request";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    /// Register of a known email: 200 with a message and no tokens
    AlreadyExists(String),
    NoContent,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoContent => return StatusCode::NO_CONTENT.into_response(),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::AlreadyExists(msg) => (StatusCode::OK, msg),
        };

        (status, Json(MessageData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserAlreadyExists | UserError::DuplicateEmail(_) => {
                ApiError::AlreadyExists(UserError::UserAlreadyExists.to_string())
            }
            UserError::UserNotFound(_) | UserError::EmptyPage(_) => ApiError::NoContent,
            UserError::IncorrectSignIn | UserError::Unauthorized => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPageNumber(_)
            | UserError::InvalidRefresh => ApiError::BadRequest(err.to_string()),
            UserError::Crypto(_)
            | UserError::Password(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

/// Token pair response; the refresh half travels in a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtTokenResponseData {
    pub access_token: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: i64,
    pub email: String,
}

impl From<&NonSensitiveUserView> for UserResponseData {
    fn from(user: &NonSensitiveUserView) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
        }
    }
}
