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

use axum::{Extension, extract::State, http::StatusCode};
use tracing::info;

use crate::auth::VerifiedToken;
use crate::content::{NewProject, Project, ProjectFilter, ProjectPatch};
use crate::web::{
    error::Result,
    extract::{Json, Path, Query},
    models::{
        auth::SuccessResponse,
        content::{ProjectListResponse, ProjectQuery},
    },
    state::AppState,
};

/// Published projects, optionally only featured ones.
pub async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Json<ProjectListResponse> {
    let filter = ProjectFilter {
        published_only: true,
        featured: query.featured,
    };
    Json(ProjectListResponse {
        projects: state.store.list_projects(filter).await,
    })
}

pub async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>> {
    Ok(Json(state.store.project_by_slug(&slug, true).await?))
}

pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Json<ProjectListResponse> {
    let filter = ProjectFilter {
        published_only: false,
        featured: query.featured,
    };
    Json(ProjectListResponse {
        projects: state.store.list_projects(filter).await,
    })
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Project>> {
    Ok(Json(state.store.get_project(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Json(new): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>)> {
    let project = state.store.create_project(new).await?;
    info!(id = project.id, by = %session.identity.username, "project created via admin API");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Path(id): Path<u64>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>> {
    let project = state.store.update_project(id, patch).await?;
    info!(id, by = %session.identity.username, "project updated via admin API");
    Ok(Json(project))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Path(id): Path<u64>,
) -> Result<Json<SuccessResponse>> {
    state.store.delete_project(id).await?;
    info!(id, by = %session.identity.username, "project deleted via admin API");
    Ok(Json(SuccessResponse::ok()))
}
