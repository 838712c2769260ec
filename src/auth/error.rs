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

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AuthError {
    /// Secret, username or password is not configured.
    #[snafu(display("admin authentication is not configured"))]
    Configuration,

    #[snafu(display("username or password does not match"))]
    Authentication,

    #[snafu(display("invalid token: {}", reason))]
    TokenInvalid { reason: String },

    #[snafu(display("token expired"))]
    TokenExpired,

    #[snafu(display("failed to sign token: {}", source))]
    Signing { source: jsonwebtoken::errors::Error },
}

impl AuthError {
    /// Server-side failures, as opposed to anything the client got wrong.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, AuthError::Configuration | AuthError::Signing { .. })
    }
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;
