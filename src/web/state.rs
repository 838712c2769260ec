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

use std::sync::Arc;

use crate::auth::{ProtectedPathSet, TokenCodec};
use crate::config::Config;
use crate::content::ContentStore;

/// Shared application state.
///
/// Everything except the content store is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no signing secret is configured.
    pub codec: Option<Arc<TokenCodec>>,
    pub gate: Arc<ProtectedPathSet>,
    pub store: Arc<ContentStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(ContentStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<ContentStore>) -> Self {
        let codec = config
            .auth
            .jwt_secret
            .as_deref()
            .map(|secret| Arc::new(TokenCodec::new(secret.as_bytes())));

        Self {
            config: Arc::new(config),
            codec,
            gate: Arc::new(ProtectedPathSet::default()),
            store,
        }
    }

    pub fn codec(&self) -> Option<&TokenCodec> {
        self.codec.as_deref()
    }
}
