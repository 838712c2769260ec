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

use http::{HeaderMap, header};

pub const COOKIE_NAME: &str = "admin_token";

const ATTRIBUTES: &str = "HttpOnly; SameSite=Lax; Path=/";

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    with_secure(
        format!(
            "{}={}; {}; Max-Age={}",
            COOKIE_NAME, token, ATTRIBUTES, max_age_secs
        ),
        secure,
    )
}

/// `Set-Cookie` value that makes the browser drop the token.
pub fn removal_cookie(secure: bool) -> String {
    with_secure(format!("{}=; {}; Max-Age=0", COOKIE_NAME, ATTRIBUTES), secure)
}

fn with_secure(mut cookie: String, secure: bool) -> String {
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extracts the token from the request's `Cookie` headers. An empty value
/// counts as absent.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(parse_token_cookie)
}

fn parse_token_cookie(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
    })
}
