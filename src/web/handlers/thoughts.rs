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
use crate::content::{NewThought, Thought, ThoughtPatch};
use crate::web::{
    error::Result,
    extract::{Json, Path},
    models::{auth::SuccessResponse, content::ThoughtListResponse},
    state::AppState,
};

/// Published thoughts, newest first.
pub async fn list_published(State(state): State<AppState>) -> Json<ThoughtListResponse> {
    Json(ThoughtListResponse {
        thoughts: state.store.list_thoughts(true).await,
    })
}

/// A published thought by slug. Drafts are reported as missing.
pub async fn get_published(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Thought>> {
    Ok(Json(state.store.thought_by_slug(&slug, true).await?))
}

/// All thoughts, drafts included.
pub async fn list_all(State(state): State<AppState>) -> Json<ThoughtListResponse> {
    Json(ThoughtListResponse {
        thoughts: state.store.list_thoughts(false).await,
    })
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Thought>> {
    Ok(Json(state.store.get_thought(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Json(new): Json<NewThought>,
) -> Result<(StatusCode, Json<Thought>)> {
    let thought = state.store.create_thought(new).await?;
    info!(id = thought.id, by = %session.identity.username, "thought created via admin API");
    Ok((StatusCode::CREATED, Json(thought)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Path(id): Path<u64>,
    Json(patch): Json<ThoughtPatch>,
) -> Result<Json<Thought>> {
    let thought = state.store.update_thought(id, patch).await?;
    info!(id, by = %session.identity.username, "thought updated via admin API");
    Ok(Json(thought))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<VerifiedToken>,
    Path(id): Path<u64>,
) -> Result<Json<SuccessResponse>> {
    state.store.delete_thought(id).await?;
    info!(id, by = %session.identity.username, "thought deleted via admin API");
    Ok(Json(SuccessResponse::ok()))
}
