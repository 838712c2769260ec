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

use crate::auth::AdminIdentity;
use crate::auth::error::{AuthError, Result};
use crate::config::AuthConfig;

/// Checks submitted credentials against the configured admin pair.
///
/// Comparison is a plain string equality; there is no hashing and no
/// constant-time comparison.
pub struct CredentialValidator<'a> {
    config: &'a AuthConfig,
}

impl<'a> CredentialValidator<'a> {
    pub fn new(config: &'a AuthConfig) -> Self {
        Self { config }
    }

    /// Returns whether the pair matches. Fails only when the server is not
    /// configured, including a missing signing secret.
    pub fn validate(&self, username: &str, password: &str) -> Result<bool> {
        let (Some(_), Some(expected_user), Some(expected_pass)) = (
            self.config.jwt_secret.as_deref(),
            self.config.admin_username.as_deref(),
            self.config.admin_password.as_deref(),
        ) else {
            return Err(AuthError::Configuration);
        };

        Ok(username == expected_user && password == expected_pass)
    }

    /// Like [`validate`](Self::validate) but maps a mismatch to
    /// [`AuthError::Authentication`] and yields the admin identity.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AdminIdentity> {
        if self.validate(username, password)? {
            Ok(AdminIdentity::admin(username))
        } else {
            Err(AuthError::Authentication)
        }
    }
}
