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

use crate::config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod auth;
pub mod config;
pub mod content;
pub mod web;

shadow_rs::shadow!(build);

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    info!(
        version = build::PKG_VERSION,
        commit = build::SHORT_COMMIT,
        environment = %config.environment,
        "starting folio"
    );

    // Startup continues; logins answer with a configuration error.
    let missing = config.auth.missing();
    if !missing.is_empty() {
        error!(
            count = missing.len(),
            "admin authentication is not fully configured; logins will fail"
        );
    }

    web::server::run(config).await
}
