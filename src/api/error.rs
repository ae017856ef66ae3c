// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! API error type and the JSON error body it renders to.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

/// Error codes for API responses
pub mod error_codes {
    pub const MOVIE_NOT_FOUND: &str = "MOVIE_NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetail>,
}

/// Additional error details
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Requested movie ID if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<i64>,
    /// Technical error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: ErrorDetail) -> Self {
        self.details = Some(details);
        self
    }

    /// Pair the body with the status code its error code maps to.
    pub fn with_status(self) -> (StatusCode, Json<Self>) {
        let status = status_from_code(&self.code);
        (status, Json(self))
    }
}

fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::MOVIE_NOT_FOUND => StatusCode::NOT_FOUND,
        error_codes::INVALID_REQUEST => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failure of a catalog request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Movie not found")]
    MovieNotFound(i64),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::MovieNotFound(id) => {
                ErrorResponse::new(error_codes::MOVIE_NOT_FOUND, err.to_string()).with_details(
                    ErrorDetail {
                        movie_id: Some(*id),
                        ..Default::default()
                    },
                )
            }
            ApiError::InvalidRequest(message) => {
                ErrorResponse::new(error_codes::INVALID_REQUEST, message.clone())
            }
            ApiError::Store(store_err) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
                    .with_details(ErrorDetail {
                        technical_details: Some(store_err.to_string()),
                        ..Default::default()
                    })
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            error!("Catalog store failure: {e}");
        }
        ErrorResponse::from(&self).with_status().into_response()
    }
}
