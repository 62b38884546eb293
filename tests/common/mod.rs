#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tutorlink::{
    app::build_app,
    config::{AppConfig, JwtConfig},
    db, seed,
    state::AppState,
};

/// Password given to every seeded tutor account.
pub const SEED_PASSWORD: &str = "password";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// `name=value` pair from the `Set-Cookie` header, if any.
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt: JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 60,
            cookie_secure: false,
        },
    }
}

/// Router over a fresh in-memory database loaded with the sample directory.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Like `spawn_app`, but backed by a database file so the pool holds several
/// connections. Keep the returned directory alive for the test's duration.
pub async fn spawn_app_on_file() -> (TestApp, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tutorlink.db");
    let mut config = test_config();
    config.database_url = format!("sqlite://{}?mode=rwc", path.display());
    (spawn_app_with(config).await, dir)
}

async fn spawn_app_with(config: AppConfig) -> TestApp {
    let config = Arc::new(config);
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open database");
    db::migrate(&pool).await.expect("Failed to migrate");
    seed::run(&pool, SEED_PASSWORD)
        .await
        .expect("Failed to seed");

    let state = AppState::from_parts(pool.clone(), config.clone());
    TestApp {
        router: build_app(state),
        db: pool,
        config,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// Sign in and return the session cookie.
    pub async fn signin(&self, username: &str, password: &str) -> String {
        let res = self
            .request(
                Method::POST,
                "/signin",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "signin failed: {:?}", res.body);
        res.cookie().expect("signin sets a cookie")
    }

    /// Create an account and return the session cookie.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        let res = self
            .request(
                Method::POST,
                "/signup",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "signup failed: {:?}", res.body);
        res.cookie().expect("signup sets a cookie")
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(sql).fetch_one(&self.db).await.unwrap();
        n
    }
}
