use std::{fmt::Display, str::FromStr};

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use pq_domain::{Address, QuestId};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize, Debug)]
pub(crate) struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub(crate) fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
        }
    }
}

pub(crate) fn error(code: StatusCode, message: impl Into<String>) -> Response {
    (code, Json(ErrorResponse::new(code, message))).into_response()
}

pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    error(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn not_found(message: impl Into<String>) -> Response {
    error(StatusCode::NOT_FOUND, message)
}

/// Logs the cause and answers with a generic 500.
pub(crate) fn internal_error(operation: &str, cause: impl Display) -> Response {
    tracing::error!(operation, error = %cause, "Request failed");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

pub(crate) fn invalid_query(errors: &ValidationErrors) -> Response {
    bad_request(format!("Invalid query: {errors}"))
}

pub(crate) fn parse_address(raw: &str) -> Result<Address, Response> {
    Address::from_str(raw.trim())
        .map_err(|_| bad_request(format!("'{raw}' is not a valid address")))
}

pub(crate) fn parse_quest_id(raw: &str) -> Result<QuestId, Response> {
    raw.trim()
        .parse::<u64>()
        .map(QuestId::new)
        .map_err(|_| bad_request(format!("Quest id: {raw} is in wrong format")))
}

pub(crate) fn ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}
