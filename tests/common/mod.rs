#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceExt;

use promptreel::{api, config::Config, state::AppState};

pub const TEST_VIDEO_URL: &str = "https://videos.example.com/sample.mp4";

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        demo_video_url: TEST_VIDEO_URL.to_string(),
        request_timeout: Duration::from_secs(30),
    }
}

pub fn build_test_app() -> Router {
    api::router(AppState::new(test_config()))
}

/// Extra routes behind the production middleware stack.
pub fn build_test_app_with(routes: Router<AppState>) -> Router {
    api::routes::with_middleware(routes, AppState::new(test_config()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
    post_raw(app, uri, Some("application/json"), body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Bytes>,
) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.into())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Binds an ephemeral port and serves `app` on it in the background.
pub async fn spawn_app(app: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}
