//! Typed errors and HTTP mapping.

use crate::response::{ErrorBody, ErrorDetail};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error and detail codes carried in the error envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPagination,
    InvalidPage,
    InvalidPageSize,
    InvalidSorting,
    UnsupportedSortingField,
    InvalidFilter,
    #[serde(rename = "ZEROID_NOT_FOUND")]
    ZeroIdNotFound,
    NotFound,
    InvalidEntity,
    NewEntityWithId,
    EditEntityWithoutId,
    InvalidId,
    IdMismatch,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPagination => "INVALID_PAGINATION",
            ErrorCode::InvalidPage => "INVALID_PAGE",
            ErrorCode::InvalidPageSize => "INVALID_PAGE_SIZE",
            ErrorCode::InvalidSorting => "INVALID_SORTING",
            ErrorCode::UnsupportedSortingField => "UNSUPPORTED_SORTING_FIELD",
            ErrorCode::InvalidFilter => "INVALID_FILTER",
            ErrorCode::ZeroIdNotFound => "ZEROID_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidEntity => "INVALID_ENTITY",
            ErrorCode::NewEntityWithId => "NEW_ENTITY_WITH_ID",
            ErrorCode::EditEntityWithoutId => "EDIT_ENTITY_WITHOUT_ID",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::IdMismatch => "ID_MISMATCH",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate sortable field: {0}")]
    DuplicateSortableField(String),
    #[error("duplicate filter: {0}")]
    DuplicateFilter(String),
    #[error("filter name is a reserved query key: {0}")]
    ReservedFilterName(String),
    #[error("invalid entity id name on url: '{0}'")]
    InvalidIdParam(String),
    #[error("config load: {0}")]
    Load(String),
}

/// Failure raised by an [`EntityStore`](crate::store::EntityStore). Never recovered by the handlers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("backend: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A validation or not-found outcome, rendered as the error envelope.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Vec<ErrorDetail>>,
}

impl ApiError {
    pub fn bad_request(code: ErrorCode, message: impl Into<String>, details: Vec<ErrorDetail>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: ErrorCode::NotFound,
            message: "Entity not found".into(),
            details: None,
        }
    }

    pub fn invalid_page(raw: Option<&str>) -> Self {
        Self::bad_request(
            ErrorCode::InvalidPagination,
            "Invalid pagination",
            vec![ErrorDetail::new(ErrorCode::InvalidPage, "Invalid page", "query:page", raw_value(raw))],
        )
    }

    pub fn invalid_page_size(raw: Option<&str>) -> Self {
        Self::bad_request(
            ErrorCode::InvalidPagination,
            "Invalid pagination",
            vec![ErrorDetail::new(
                ErrorCode::InvalidPageSize,
                "Invalid page size",
                "query:pageSize",
                raw_value(raw),
            )],
        )
    }

    pub fn unsupported_sorting_field(sort_by: &str) -> Self {
        Self::bad_request(
            ErrorCode::InvalidSorting,
            "Invalid sorting",
            vec![ErrorDetail::new(
                ErrorCode::UnsupportedSortingField,
                "Cannot sort by the provided field",
                "query:sortBy",
                Value::String(sort_by.to_string()),
            )],
        )
    }

    /// One detail per unknown filter key, in query order.
    pub fn invalid_filters<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let details = names
            .into_iter()
            .map(|name| {
                ErrorDetail::new(ErrorCode::InvalidFilter, "Invalid filter", "query", Value::String(name.to_string()))
            })
            .collect();
        Self::bad_request(ErrorCode::InvalidFilter, "Invalid filter", details)
    }

    pub fn zero_id_not_found(zero_id: &str) -> Self {
        Self::bad_request(
            ErrorCode::ZeroIdNotFound,
            "Zero ID could not be found",
            vec![ErrorDetail::new(
                ErrorCode::ZeroIdNotFound,
                "Zero ID could not be found after filtering",
                "query:zeroId",
                Value::String(zero_id.to_string()),
            )],
        )
    }

    pub fn new_entity_with_id(id: &str) -> Self {
        Self::bad_request(
            ErrorCode::InvalidEntity,
            "Invalid entity",
            vec![ErrorDetail::new(
                ErrorCode::NewEntityWithId,
                "New entities must not have an ID set",
                "id",
                Value::String(id.to_string()),
            )],
        )
    }

    pub fn edit_entity_without_id() -> Self {
        Self::bad_request(
            ErrorCode::InvalidEntity,
            "Invalid entity",
            vec![ErrorDetail::new(
                ErrorCode::EditEntityWithoutId,
                "Existing entities must have an ID set",
                "id",
                Value::Null,
            )],
        )
    }

    pub fn id_mismatch(body_id: &str) -> Self {
        Self::bad_request(
            ErrorCode::InvalidId,
            "Invalid ID",
            vec![ErrorDetail::new(
                ErrorCode::IdMismatch,
                "Id from the entity and from the path are not the same",
                "id",
                Value::String(body_id.to_string()),
            )],
        )
    }

    /// Request body that is not a `{ "data": entity }` JSON envelope.
    pub fn invalid_body(reason: &str) -> Self {
        Self::bad_request(
            ErrorCode::InvalidEntity,
            "Invalid entity",
            vec![ErrorDetail::new(ErrorCode::InvalidEntity, reason, "data", Value::Null)],
        )
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.code, self.message.clone(), self.details.clone())
    }
}

fn raw_value(raw: Option<&str>) -> Value {
    raw.map(|s| Value::String(s.to_string())).unwrap_or(Value::Null)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut err = Self::invalid_body(&rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            err.status = StatusCode::PAYLOAD_TOO_LARGE;
        }
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self.body())).into_response()
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Api(e) => e.into_response(),
            AppError::Store(e) => {
                tracing::error!(error = %e, "entity store failure");
                let body = ErrorBody::new(ErrorCode::InternalError, "Internal error".into(), None);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
