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

use axum::{Extension, extract::State, http::header, response::IntoResponse};
use tracing::info;

use crate::auth::{AuthError, CredentialValidator, VerifiedToken, cookie};
use crate::web::{
    error::{ErrorResponse, Result},
    extract::Json,
    models::auth::{LoginRequest, SessionResponse, SuccessResponse},
    state::AppState,
};

/// Login
///
/// Checks the admin credentials and sets the `admin_token` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, token cookie set", body = SuccessResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 500, description = "Authentication is not configured", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    info!("Login attempt");

    let identity =
        CredentialValidator::new(&state.config.auth).authenticate(&req.username, &req.password)?;
    let codec = state.codec().ok_or(AuthError::Configuration)?;
    let issued = codec.issue(&identity)?;

    let cookie = cookie::session_cookie(
        &issued.token,
        codec.ttl().num_seconds(),
        state.config.secure_cookies(),
    );

    info!(
        username = %identity.username,
        expires_at = %issued.expires_at,
        "admin logged in"
    );

    Ok(([(header::SET_COOKIE, cookie)], Json(SuccessResponse::ok())))
}

/// Logout
///
/// Always succeeds, with or without a cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses((status = 200, description = "Token cookie removed", body = SuccessResponse))
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = cookie::removal_cookie(state.config.secure_cookies());
    ([(header::SET_COOKIE, cookie)], Json(SuccessResponse::ok()))
}

/// Session check
#[utoipa::path(
    get,
    path = "/api/admin/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current admin session", body = SessionResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
    )
)]
pub async fn session_check(Extension(session): Extension<VerifiedToken>) -> Json<SessionResponse> {
    Json(SessionResponse {
        valid: true,
        username: session.identity.username,
        role: session.identity.role.to_string(),
        expires_at: session.expires_at.to_rfc3339(),
    })
}
