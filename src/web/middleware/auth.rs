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
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{GateDecision, cookie};
use crate::web::{error, state::AppState};

/// Access gate middleware.
///
/// Runs on every request. Unprotected paths pass straight through; protected
/// ones need a valid `admin_token` cookie, whose verified identity is then
/// inserted into the request extensions as a `VerifiedToken`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie::token_from_headers(request.headers());
    let decision = state
        .gate
        .evaluate(request.uri().path(), token.as_deref(), state.codec());
    let secure = state.config.secure_cookies();

    match decision {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Allow(verified) => {
            request.extensions_mut().insert(verified);
            next.run(request).await
        }
        GateDecision::ShowLogin { clear_cookie } => {
            let response = next.run(request).await;
            if clear_cookie {
                clear_token_cookie(response, secure)
            } else {
                response
            }
        }
        GateDecision::Unauthorized => error::unauthorized(),
        GateDecision::RedirectToLogin { clear_cookie } => {
            let response = Redirect::temporary(state.gate.login_page()).into_response();
            if clear_cookie {
                clear_token_cookie(response, secure)
            } else {
                response
            }
        }
    }
}

fn clear_token_cookie(mut response: Response, secure: bool) -> Response {
    if let Ok(value) = HeaderValue::from_str(&cookie::removal_cookie(secure)) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}
