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

//! Access gate decision logic.
//!
//! [`ProtectedPathSet::evaluate`] is a pure function of the request path, the
//! presence of the token cookie and the token's validity. The axum middleware
//! turns the resulting [`GateDecision`] into a response.

use tracing::{debug, warn};

use crate::auth::error::AuthError;
use crate::auth::token::{TokenCodec, VerifiedToken};

pub const ADMIN_PAGE_PREFIX: &str = "/admin";
pub const ADMIN_API_PREFIX: &str = "/api/admin";
pub const LOGIN_PAGE: &str = const_str::concat!(ADMIN_PAGE_PREFIX, "/login");

/// What kind of protected resource a path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Page,
    Api,
}

/// Token state for one request to a protected path.
#[derive(Debug)]
pub enum TokenState {
    NoToken,
    ValidToken(VerifiedToken),
    InvalidOrExpiredToken(AuthError),
}

impl TokenState {
    /// Without a codec (no signing secret configured) no token can be valid.
    pub fn resolve(token: Option<&str>, codec: Option<&TokenCodec>) -> Self {
        let Some(token) = token else {
            return TokenState::NoToken;
        };

        match codec {
            None => TokenState::InvalidOrExpiredToken(AuthError::Configuration),
            Some(codec) => match codec.verify(token) {
                Ok(verified) => TokenState::ValidToken(verified),
                Err(e) => TokenState::InvalidOrExpiredToken(e),
            },
        }
    }
}

/// What the gate does with a request.
#[derive(Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is not protected.
    PassThrough,
    /// Valid token; the identity is handed to the handler.
    Allow(VerifiedToken),
    /// The login page, reached without a valid token. Never redirected.
    ShowLogin { clear_cookie: bool },
    /// Protected API call without a valid token.
    Unauthorized,
    /// Protected page without a valid token.
    RedirectToLogin { clear_cookie: bool },
}

/// URL prefixes guarded by the gate.
#[derive(Debug, Clone)]
pub struct ProtectedPathSet {
    pages: Vec<String>,
    apis: Vec<String>,
    login_page: String,
}

impl Default for ProtectedPathSet {
    fn default() -> Self {
        Self {
            pages: vec![ADMIN_PAGE_PREFIX.to_string()],
            apis: vec![ADMIN_API_PREFIX.to_string()],
            login_page: LOGIN_PAGE.to_string(),
        }
    }
}

impl ProtectedPathSet {
    pub fn new(pages: Vec<String>, apis: Vec<String>, login_page: impl Into<String>) -> Self {
        Self {
            pages,
            apis,
            login_page: login_page.into(),
        }
    }

    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    pub fn classify(&self, path: &str) -> Option<PathKind> {
        if self.apis.iter().any(|p| under_prefix(path, p)) {
            Some(PathKind::Api)
        } else if self.pages.iter().any(|p| under_prefix(path, p)) {
            Some(PathKind::Page)
        } else {
            None
        }
    }

    /// Exact match; `/admin/login/` is an ordinary page and gets redirected.
    fn is_login_page(&self, path: &str) -> bool {
        path == self.login_page
    }

    pub fn evaluate(
        &self,
        path: &str,
        token: Option<&str>,
        codec: Option<&TokenCodec>,
    ) -> GateDecision {
        let Some(kind) = self.classify(path) else {
            return GateDecision::PassThrough;
        };

        match TokenState::resolve(token, codec) {
            TokenState::ValidToken(verified) => GateDecision::Allow(verified),
            TokenState::NoToken => {
                debug!(path, "no admin token");
                match kind {
                    PathKind::Api => GateDecision::Unauthorized,
                    PathKind::Page if self.is_login_page(path) => {
                        GateDecision::ShowLogin { clear_cookie: false }
                    }
                    PathKind::Page => GateDecision::RedirectToLogin { clear_cookie: false },
                }
            }
            TokenState::InvalidOrExpiredToken(e) => {
                warn!(path, error = %e, "admin token rejected");
                match kind {
                    PathKind::Api => GateDecision::Unauthorized,
                    PathKind::Page if self.is_login_page(path) => {
                        GateDecision::ShowLogin { clear_cookie: true }
                    }
                    PathKind::Page => GateDecision::RedirectToLogin { clear_cookie: true },
                }
            }
        }
    }
}

/// `/admin` matches `/admin` and `/admin/...` but not `/administrator`.
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
