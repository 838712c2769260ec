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
    Router,
    routing::{get, post},
};

use crate::web::{handlers, state::AppState};

/// Login and logout, mounted under `/api/auth`. Not gated.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
}

/// Read-only content for the public site, mounted under `/api`.
pub fn public_content_routes() -> Router<AppState> {
    Router::new()
        .route("/thoughts", get(handlers::thoughts::list_published))
        .route("/thoughts/{slug}", get(handlers::thoughts::get_published))
        .route("/projects", get(handlers::projects::list_published))
        .route("/projects/{slug}", get(handlers::projects::get_published))
}

/// Admin API, mounted under `/api/admin`.
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(handlers::auth::session_check))
        .route(
            "/thoughts",
            get(handlers::thoughts::list_all).post(handlers::thoughts::create),
        )
        .route(
            "/thoughts/{id}",
            get(handlers::thoughts::get_by_id)
                .put(handlers::thoughts::update)
                .delete(handlers::thoughts::delete),
        )
        .route(
            "/projects",
            get(handlers::projects::list_all).post(handlers::projects::create),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_by_id)
                .put(handlers::projects::update)
                .delete(handlers::projects::delete),
        )
}

/// Admin pages, mounted under `/admin`.
pub fn admin_page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::dashboard))
        .route("/login", get(handlers::pages::login_page))
}
