/// HTTP adapter for the canvas trigger handler
///
/// Converts a live axum request into a normalized trigger event, runs the
/// handler, and converts the normalized response back. A store failure is
/// the one case where the handler constructs no response; this layer logs
/// it and answers the generic 500 on the handler's behalf.

use crate::trigger::{CanvasHandler, TriggerEvent, TriggerResponse};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{self, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, Router},
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Request handler bound to the canvas store
    pub handler: Arc<CanvasHandler>,
}

/// Create the canvas routes
///
/// The contract is method-dispatched, not path-dispatched, so every path
/// lands in the same handler.
pub fn create_canvas_routes() -> Router<AppState> {
    Router::new()
        .route("/", any(dispatch_canvas))
        .fallback(dispatch_canvas)
}

/// Adapt one HTTP request into a trigger event and back
pub(crate) async fn dispatch_canvas(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let event = TriggerEvent {
        http_method: method.as_str().to_string(),
        query_string_parameters: params,
        body: if body.is_empty() { None } else { Some(body) },
    };

    match state.handler.handle(event).await {
        Ok(response) => into_http_response(response),
        Err(e) => {
            tracing::error!("❌ Canvas store failure: {:#}", e);
            into_http_response(TriggerResponse::json(
                500,
                &json!({ "error": "Internal server error" }),
            ))
        }
    }
}

fn into_http_response(response: TriggerResponse) -> Response {
    let mut builder = http::Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
