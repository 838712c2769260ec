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

//! Shared token codec used by both the login handler and the access gate.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::auth::error::{self, AuthError, Result};
use crate::auth::{AdminIdentity, Role};

/// Tokens are valid for 24 hours after issue.
pub const TOKEN_TTL_SECS: i64 = 24 * 3600;

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username
    pub sub: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expires at (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: &AdminIdentity, issued_at: DateTime<Utc>, ttl: TimeDelta) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: identity.username.clone(),
            role: identity.role,
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The outcome of a successful verification. Inserted into request
/// extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity: AdminIdentity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// HS256 signer and verifier bound to one secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::seconds(TOKEN_TTL_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn issue(&self, identity: &AdminIdentity) -> Result<IssuedToken> {
        self.issue_at(identity, Utc::now())
    }

    /// Signs a token as if it had been issued at `issued_at`.
    pub fn issue_at(&self, identity: &AdminIdentity, issued_at: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = Claims::new(identity, issued_at, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context(error::SigningSnafu)?;

        Ok(IssuedToken {
            token,
            expires_at: timestamp(claims.exp)?,
        })
    }

    /// Checks signature, algorithm, claim shape and expiry.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid {
                    reason: e.to_string(),
                },
            })?
            .claims;

        // The payload is authoritative for expiry, whatever the cookie says.
        if claims.exp < Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(VerifiedToken {
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
            identity: AdminIdentity {
                username: claims.sub,
                role: claims.role,
            },
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| AuthError::TokenInvalid {
        reason: format!("timestamp out of range: {}", secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::EncodingKey;

    fn identity() -> AdminIdentity {
        AdminIdentity::admin("admin")
    }

    #[test]
    fn test_issue_then_verify() {
        let codec = TokenCodec::new(b"signing-secret");
        let issued = codec.issue(&identity()).unwrap();

        let verified = codec.verify(&issued.token).unwrap();
        assert_eq!(verified.identity, identity());
        assert_eq!(verified.expires_at, issued.expires_at);
        assert_eq!(
            (verified.expires_at - verified.issued_at).num_seconds(),
            TOKEN_TTL_SECS
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = TokenCodec::new(b"signing-secret");
        let issued = codec
            .issue_at(&identity(), Utc::now() - TimeDelta::hours(25))
            .unwrap();

        assert!(matches!(
            codec.verify(&issued.token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = TokenCodec::new(b"someone-else");
        let verifier = TokenCodec::new(b"signing-secret");
        let issued = issuer.issue(&identity()).unwrap();

        assert!(matches!(
            verifier.verify(&issued.token),
            Err(AuthError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let codec = TokenCodec::new(b"signing-secret");
        let token = codec.issue(&identity()).unwrap().token;

        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            codec.verify(&tampered),
            Err(AuthError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let codec = TokenCodec::new(b"signing-secret");
        for token in ["", "not-a-token", "a.b.c", "a.b"] {
            assert!(matches!(
                codec.verify(token),
                Err(AuthError::TokenInvalid { .. })
            ));
        }
    }

    #[test]
    fn test_foreign_role_is_rejected() {
        #[derive(Serialize)]
        struct Foreign<'a> {
            sub: &'a str,
            role: &'a str,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &Foreign {
                sub: "admin",
                role: "editor",
                iat: now,
                exp: now + 60,
            },
            &EncodingKey::from_secret(b"signing-secret"),
        )
        .unwrap();

        let codec = TokenCodec::new(b"signing-secret");
        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_custom_ttl() {
        let codec = TokenCodec::new(b"signing-secret").with_ttl(TimeDelta::minutes(5));
        let verified = codec.verify(&codec.issue(&identity()).unwrap().token).unwrap();
        assert_eq!((verified.expires_at - verified.issued_at).num_seconds(), 300);
    }
}
