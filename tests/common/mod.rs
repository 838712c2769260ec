#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use folio::auth::cookie::COOKIE_NAME;
use folio::config::{AuthConfig, Config};
use folio::web::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "test-signing-secret";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret-pass";

pub fn test_config() -> Config {
    Config::with_auth(AuthConfig::new(SECRET, USERNAME, PASSWORD))
}

pub fn create_test_app() -> Router {
    build_router(AppState::new(test_config()))
}

pub fn create_app_with(config: Config) -> Router {
    build_router(AppState::new(config))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{COOKIE_NAME}={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("{COOKIE_NAME}={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    json_request(
        "POST",
        "/api/auth/login",
        None,
        json!({ "username": username, "password": password }),
    )
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

/// Token value from an `admin_token=<token>; ...` header.
pub fn token_from_set_cookie(cookie: &str) -> String {
    let first = cookie.split(';').next().unwrap();
    let (name, value) = first.split_once('=').unwrap();
    assert_eq!(name, COOKIE_NAME);
    value.to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Log in with the test credentials and return the issued token.
pub async fn login(app: &Router) -> String {
    let response = send(app, login_request(USERNAME, PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);
    token_from_set_cookie(&set_cookie(&response).expect("login sets a cookie"))
}
