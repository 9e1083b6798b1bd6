//! Standard response envelope helpers.

use crate::error::ErrorCode;
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct Success<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Summary of the page returned by a paginated listing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub actual_page_size: usize,
    pub total_pages: usize,
    pub total_size: usize,
}

/// Request body wrapper for create and update: `{ "data": <entity> }`.
#[derive(Deserialize, Debug)]
pub struct RequestEnvelope<T> {
    pub data: T,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: ErrorPayload,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error_code: ErrorCode,
    pub message: String,
    pub details: Option<Vec<ErrorDetail>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
    pub field: String,
    pub rejected_value: Value,
}

impl ErrorDetail {
    pub fn new(code: ErrorCode, message: &str, field: &str, rejected_value: Value) -> Self {
        Self {
            code,
            message: message.to_string(),
            field: field.to_string(),
            rejected_value,
        }
    }
}

impl ErrorBody {
    pub fn new(error_code: ErrorCode, message: String, details: Option<Vec<ErrorDetail>>) -> Self {
        Self {
            error: ErrorPayload {
                error_code,
                message,
                details,
            },
        }
    }
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success { data, pagination: None }))
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::CREATED, Json(Success { data, pagination: None }))
}

pub fn success_many<T: Serialize>(data: Vec<T>, pagination: Option<Pagination>) -> (StatusCode, Json<Success<Vec<T>>>) {
    (StatusCode::OK, Json(Success { data, pagination }))
}
