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

use axum::http::{HeaderValue, Method, header};
use axum::{Router, http::StatusCode, middleware, response::IntoResponse, routing::get};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::content::{NewProject, NewThought, Project, ProjectPatch, Thought, ThoughtPatch};
use crate::web::{
    error::ErrorResponse,
    handlers,
    middleware::auth::auth_middleware,
    models::auth::{LoginRequest, SessionResponse, SuccessResponse},
    models::content::{ProjectListResponse, ThoughtListResponse},
    routes,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::session_check,
    ),
    components(schemas(
        LoginRequest,
        SuccessResponse,
        SessionResponse,
        ErrorResponse,
        Thought,
        NewThought,
        ThoughtPatch,
        ThoughtListResponse,
        Project,
        NewProject,
        ProjectPatch,
        ProjectListResponse,
    )),
    tags((name = "auth", description = "Admin authentication"))
)]
pub struct ApiDoc;

/// Start the HTTP server and block until shutdown.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on http://{}", addr);
    info!("API endpoints:");
    info!("  - POST /api/auth/login");
    info!("  - POST /api/auth/logout");
    info!("  - GET  /api/thoughts, /api/projects");
    info!("  - *    /api/admin/... (admin token required)");
    info!("  - GET  /docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Assemble the full application.
///
/// The auth middleware is the outermost layer so that it sees every request,
/// including ones that would otherwise 404 under a protected prefix.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    let mut app = Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .nest("/api/auth", routes::auth_routes())
        .nest("/api/admin", routes::admin_api_routes())
        .nest("/api", routes::public_content_routes())
        .nest("/admin", routes::admin_page_routes())
        .with_state(state.clone())
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        );

    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;
    let origin = match origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(e) => {
            warn!(origin, error = %e, "ignoring invalid CORS origin");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::COOKIE])
            .allow_credentials(true),
    )
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn ready_check() -> impl IntoResponse {
    (StatusCode::OK, "Ready")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
