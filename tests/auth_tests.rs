mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{spawn_app, spawn_app_on_file, SEED_PASSWORD};
use tower::ServiceExt;
use serde_json::json;

#[tokio::test]
async fn test_signup_creates_one_user_and_sets_cookie() {
    let app = spawn_app().await;
    let before = app.count("SELECT COUNT(*) FROM users").await;

    let res = app
        .request(
            Method::POST,
            "/signup",
            Some(json!({ "username": "erin", "password": "hunter22" })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({}));

    let set_cookie = res.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=3600"));

    assert_eq!(app.count("SELECT COUNT(*) FROM users").await, before + 1);
    assert_eq!(
        app.count("SELECT COUNT(*) FROM users WHERE username = 'erin'").await,
        1
    );
}

#[tokio::test]
async fn test_signup_stores_hash_not_password() {
    let app = spawn_app().await;
    app.signup("erin", "hunter22").await;

    let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE username = 'erin'")
        .fetch_one(&app.db)
        .await
        .unwrap();
    assert_ne!(hash, "hunter22");
    assert!(hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_signup_existing_username_is_401() {
    let app = spawn_app().await;
    let before = app.count("SELECT COUNT(*) FROM users").await;

    let res = app
        .request(
            Method::POST,
            "/signup",
            Some(json!({ "username": "Alice", "password": "whatever" })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "User Alice already exists.");
    assert!(res.cookie().is_none());
    assert_eq!(app.count("SELECT COUNT(*) FROM users").await, before);
}

#[tokio::test]
async fn test_signup_rejects_missing_or_empty_fields() {
    let app = spawn_app().await;

    for body in [
        json!({ "username": "erin" }),
        json!({ "password": "pw" }),
        json!({ "username": "", "password": "pw" }),
        json!({ "username": "erin", "password": "" }),
        json!({ "username": null, "password": "pw" }),
    ] {
        let res = app.request(Method::POST, "/signup", Some(body), None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert!(res.error().starts_with("Invalid request: "), "{:?}", res.body);
    }

    assert_eq!(
        app.count("SELECT COUNT(*) FROM users WHERE username = 'erin'").await,
        0
    );
}

#[tokio::test]
async fn test_signup_rejects_malformed_json() {
    let app = spawn_app().await;

    let res = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.error().starts_with("Invalid request: "));

    let res = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/signup")
                .body(Body::from(r#"{"username":"a","password":"b"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin_with_seeded_account() {
    let app = spawn_app().await;

    let cookie = app.signin("Alice", SEED_PASSWORD).await;
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.len() > "jwt=".len());
}

#[tokio::test]
async fn test_signin_wrong_password_is_401_without_cookie() {
    let app = spawn_app().await;
    let (hash_before,): (String,) =
        sqlx::query_as("SELECT password_hash FROM users WHERE username = 'Bob'")
            .fetch_one(&app.db)
            .await
            .unwrap();

    let res = app
        .request(
            Method::POST,
            "/signin",
            Some(json!({ "username": "Bob", "password": "not-it" })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "Invalid password.");
    assert!(res.headers.get(header::SET_COOKIE).is_none());

    let (hash_after,): (String,) =
        sqlx::query_as("SELECT password_hash FROM users WHERE username = 'Bob'")
            .fetch_one(&app.db)
            .await
            .unwrap();
    assert_eq!(hash_before, hash_after);
}

#[tokio::test]
async fn test_signin_unknown_user_is_401() {
    let app = spawn_app().await;

    let res = app
        .request(
            Method::POST,
            "/signin",
            Some(json!({ "username": "nobody", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "User nobody not found.");
}

#[tokio::test]
async fn test_signup_then_signin() {
    let app = spawn_app().await;
    app.signup("frank", "s3cret").await;

    let cookie = app.signin("frank", "s3cret").await;
    let res = app
        .request(Method::GET, "/profile", None, Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["profile"]["username"], "frank");
}

#[tokio::test]
async fn test_signout_expires_cookie() {
    let app = spawn_app().await;

    let res = app.request(Method::POST, "/signout", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({}));

    let set_cookie = res.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("jwt=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // The browser then sends an empty cookie, which is not a session.
    let res = app
        .request(Method::GET, "/profile", None, Some("jwt="))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_same_username_one_wins() {
    let (app, _dir) = spawn_app_on_file().await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            let request = Request::builder()
                .method(Method::POST)
                .uri("/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"dup","password":"pw"}"#))
                .unwrap();
            router.oneshot(request).await.unwrap().status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let taken = statuses
        .iter()
        .filter(|s| **s == StatusCode::UNAUTHORIZED)
        .count();
    assert_eq!((ok, taken), (1, 3), "statuses: {:?}", statuses);
    assert_eq!(
        app.count("SELECT COUNT(*) FROM users WHERE username = 'dup'").await,
        1
    );

    let res = app
        .request(
            Method::POST,
            "/signup",
            Some(json!({ "username": "dup", "password": "pw" })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error(), "User dup already exists.");
}
