//! Request builders and response readers

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Method, Request},
    response::Response,
};

use fanpub::backend::auth::cookies::SESSION_COOKIE;

/// Percent-encode a form value
fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (byte as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{byte:02X}"),
        })
        .collect()
}

/// `application/x-www-form-urlencoded` body for `pairs`
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn with_cookie(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::COOKIE, format!("{SESSION_COOKIE}={token}")),
        None => builder,
    }
}

pub fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    with_cookie(Request::builder().method(Method::GET).uri(path), token)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(path: &str, pairs: &[(&str, &str)], token: Option<&str>) -> Request<Body> {
    with_cookie(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
        token,
    )
    .body(Body::from(form_body(pairs)))
    .unwrap()
}

/// Value of the `session_id` cookie set by `response`, if any
///
/// A removal cookie yields `Some("")`.
pub fn session_cookie(response: &Response) -> Option<String> {
    let prefix = format!("{SESSION_COOKIE}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .map(|value| {
            value[prefix.len()..]
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string()
        })
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[test]
fn test_form_body_encoding() {
    assert_eq!(
        form_body(&[("username", "alice"), ("password", "p&ss word")]),
        "username=alice&password=p%26ss+word"
    );
}
