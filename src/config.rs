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

//! Process configuration.
//!
//! Everything is read once at startup into a [`Config`] that is shared
//! read-only by the credential validator, the token codec and the access gate.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, ValueEnum};
use strum::Display;

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const ADMIN_USERNAME_ENV: &str = "ADMIN_USERNAME";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
pub enum Environment {
    #[default]
    #[strum(serialize = "development")]
    Development,

    #[strum(serialize = "production")]
    Production,
}

/// Admin credentials and the token signing secret.
///
/// Every field is optional so that a misconfigured process can still start
/// and answer logins with a configuration error.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("admin_username", &self.admin_username)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl AuthConfig {
    pub fn new(
        jwt_secret: impl Into<String>,
        admin_username: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            jwt_secret: Some(jwt_secret.into()),
            admin_username: Some(admin_username.into()),
            admin_password: Some(admin_password.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            jwt_secret: read(JWT_SECRET_ENV),
            admin_username: read(ADMIN_USERNAME_ENV),
            admin_password: read(ADMIN_PASSWORD_ENV),
        }
    }

    /// Names of the required variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (JWT_SECRET_ENV, &self.jwt_secret),
            (ADMIN_USERNAME_ENV, &self.admin_username),
            (ADMIN_PASSWORD_ENV, &self.admin_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub cors_origin: Option<String>,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            environment: Environment::default(),
            cors_origin: None,
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    pub fn with_auth(auth: AuthConfig) -> Self {
        Self {
            auth,
            ..Default::default()
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Cookies carry the `Secure` attribute only in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Arguments of the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "FOLIO_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Deployment environment; `production` marks cookies as Secure
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Origin allowed to call the API with credentials
    #[arg(long, env = "FOLIO_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

impl ServeArgs {
    pub fn into_config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            environment: self.environment,
            cors_origin: self.cors_origin,
            auth: AuthConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_complete_auth_config() {
        let auth = AuthConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, "secret"),
            (ADMIN_USERNAME_ENV, "admin"),
            (ADMIN_PASSWORD_ENV, "hunter2"),
        ]));
        assert!(auth.is_complete());
        assert_eq!(auth.admin_username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_missing_and_empty_values() {
        let auth = AuthConfig::from_lookup(lookup(&[
            (JWT_SECRET_ENV, ""),
            (ADMIN_USERNAME_ENV, "admin"),
        ]));
        assert_eq!(auth.missing(), vec![JWT_SECRET_ENV, ADMIN_PASSWORD_ENV]);
        assert!(!auth.is_complete());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = AuthConfig::new("top-secret", "admin", "hunter2");
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("admin"));
    }

    #[test]
    fn test_secure_cookies_only_in_production() {
        let mut config = Config::default();
        assert!(!config.secure_cookies());
        config.environment = Environment::Production;
        assert!(config.secure_cookies());
        assert_eq!(config.environment.to_string(), "production");
    }
}
