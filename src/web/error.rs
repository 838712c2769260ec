// Copyright 2025 Folio Authors
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

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::content::StoreError;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const CONFIGURATION_ERROR: &str = "Server authentication configuration error";
pub const UNAUTHORIZED: &str = "Unauthorized";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_PATH: &str = "Invalid path parameter";
pub const INVALID_QUERY: &str = "Invalid query string";

/// HTTP boundary error. Client-facing text is generic; details go to the log.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(context(false), display("auth: {}", source))]
    Auth { source: AuthError },

    #[snafu(context(false), display("content: {}", source))]
    Store { source: StoreError },

    #[snafu(display("Bad request: {}", message))]
    BadRequest { message: String },
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn rejected(message: &str, rejection: impl std::fmt::Display) -> Error {
    warn!(error = %rejection, "request rejected: {}", message);
    Error::BadRequest {
        message: message.to_string(),
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        rejected(INVALID_BODY, rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        rejected(INVALID_PATH, rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        rejected(INVALID_QUERY, rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Auth { source } if source.is_server_fault() => {
                error!(error = %source, "admin authentication failed on the server side");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONFIGURATION_ERROR.to_string(),
                )
            }
            Error::Auth {
                source: AuthError::Authentication,
            } => {
                warn!("admin login rejected");
                (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
            }
            Error::Auth { source } => {
                warn!(error = %source, "admin token rejected");
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED.to_string())
            }
            Error::Store { source } => match source {
                StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, source.to_string()),
                StoreError::SlugTaken { .. } => (StatusCode::CONFLICT, source.to_string()),
                StoreError::Invalid { .. } => (StatusCode::BAD_REQUEST, source.to_string()),
            },
            Error::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Bare 401 used by the access gate for API paths.
pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(UNAUTHORIZED))).into_response()
}

pub type Result<T> = std::result::Result<T, Error>;
