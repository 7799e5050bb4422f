//! Shared helpers for driving the router in-process
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use quill::auth::AuthService;
use quill::http_server::server::build_router;
use quill::http_server::{AppState, HttpServerConfig};
use quill::store::Database;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db = Database::in_memory().await.expect("in-memory database");
        db.create_schema().await.expect("schema");

        let state = AppState::new(db.clone(), AuthService::default());
        let router = build_router(&HttpServerConfig::default(), state);

        Self { router, db }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await
    }

    /// Register and log in, returning the access token
    pub async fn signed_in(&self, username: &str) -> String {
        let (status, _) = self.register(username, "password123").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/posts",
                Some(token),
                Some(json!({"title": title, "content": content})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }
}
