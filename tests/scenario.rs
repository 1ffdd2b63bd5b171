/// End-to-end tests through the HTTP adapter
///
/// Builds the full application against a throwaway SQLite file and drives
/// it with in-process requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use canvas_api::config::{Config, DatabaseConfig, ServerConfig};
use canvas_api::server::create_app;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}/canvas.db?mode=rwc", dir.path().display()),
        },
    };
    let app = create_app(config).await.unwrap();
    (app, dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_check_responds() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn preflight_carries_cors_headers() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-max-age"], "86400");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn full_canvas_scenario() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(r##"{"action":"create_project","name":"Board1"}"##),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "project_id": 1 }));

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(r##"{"action":"save_objects","project_id":1,"objects":[{"id":"o1","type":"rect","x":10,"y":20,"color":"#fff"}]}"##),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, "GET", "/?project_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["name"], "Board1");
    assert_eq!(body["objects"][0]["object_id"], "o1");

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"][0]["name"], "Board1");
}

#[tokio::test]
async fn unknown_methods_answer_405_on_any_path() {
    let (app, _dir) = test_app().await;

    for uri in ["/", "/anything/else", "/healthz"] {
        let (status, body) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "uri {uri}");
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    let (status, _) = send(&app, "PUT", "/", Some("{}")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn client_errors_surface_as_400() {
    let (app, _dir) = test_app().await;

    let (status, _) = send(&app, "GET", "/?project_id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/", Some(r##"{"action":"nonsense"}"##)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn store_failure_surfaces_generic_500() {
    let (app, _dir) = test_app().await;

    // Foreign keys are enforced: objects cannot attach to a project that
    // does not exist, so the store rejects the insert and the adapter
    // answers on the handler's behalf.
    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(r##"{"action":"save_objects","project_id":42,"objects":[{"id":"o1","type":"rect","x":0,"y":0,"color":"#fff"}]}"##),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn missing_project_reads_as_null() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "GET", "/?project_id=999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "project": null, "objects": [] }));
}
