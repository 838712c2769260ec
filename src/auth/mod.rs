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

//! Admin authentication: credential check, token codec, cookie handling and
//! the access gate that guards `/admin` and `/api/admin`.
//!
//! The server keeps no session records. A token is valid when its signature
//! checks out against the configured secret and its embedded expiry has not
//! passed, so a token cannot be revoked before it expires.

use serde::{Deserialize, Serialize};
use strum::Display;

pub mod cookie;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod token;

pub use credentials::CredentialValidator;
pub use error::AuthError;
pub use gate::{GateDecision, PathKind, ProtectedPathSet, TokenState};
pub use token::{Claims, IssuedToken, TokenCodec, VerifiedToken};

/// Role claim carried by every token. There is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(serialize = "admin")]
    Admin,
}

/// The single site administrator, derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
    pub role: Role,
}

impl AdminIdentity {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Admin,
        }
    }
}
