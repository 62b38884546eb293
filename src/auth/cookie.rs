//! Reading and writing the `jwt` session cookie.

use std::time::Duration;

use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "jwt";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, max_age: Duration, secure: bool) -> String {
    build(token, max_age.as_secs(), secure)
}

/// `Set-Cookie` value that makes the browser drop the session.
pub fn expired_cookie(secure: bool) -> String {
    build("", 0, secure)
}

fn build(value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// First value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}
