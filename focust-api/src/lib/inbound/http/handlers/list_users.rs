use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::domain::user::models::PageRequest;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

pub async fn list_users(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListUsersQuery>, ApiError>,
) -> Result<([(&'static str, String); 1], ApiSuccess<Vec<UserResponseData>>), ApiError> {
    let page_request = PageRequest::from_page_number(query.page_number)?;

    let page = state
        .user_service
        .list_users(page_request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        [(TOTAL_COUNT_HEADER, page.total.to_string())],
        ApiSuccess::new(
            StatusCode::OK,
            page.entries.iter().map(UserResponseData::from).collect(),
        ),
    ))
}

/// 1-based page number; defaults to the first page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersQuery {
    #[serde(rename = "pageNumber", default = "first_page")]
    page_number: i64,
}

fn first_page() -> i64 {
    1
}
