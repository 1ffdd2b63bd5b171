/// Canvas request handler
///
/// Dispatches a normalized trigger event on HTTP method and the `action`
/// field of the JSON body, runs the matching storage operation, and builds
/// the normalized response.
///
/// Every response the contract defines comes back as `Ok`, including the
/// 400/405 client errors. `Err` means the store itself failed; no response
/// is constructed for that case and the transport adapter answers with its
/// generic 500.

use crate::canvas::{CanvasAction, CanvasStorage};
use crate::trigger::event::{TriggerEvent, TriggerResponse};
use anyhow::Result;
use serde_json::{json, Value};

/// Stateless request handler bound to one canvas store
///
/// The storage handle is injected at construction time so tests can point
/// the handler at an in-memory store.
#[derive(Debug, Clone)]
pub struct CanvasHandler {
    storage: CanvasStorage,
}

impl CanvasHandler {
    /// Create a handler over the given canvas store
    pub fn new(storage: CanvasStorage) -> Self {
        Self { storage }
    }

    /// Handle one trigger event to completion
    pub async fn handle(&self, event: TriggerEvent) -> Result<TriggerResponse> {
        tracing::debug!("📥 Canvas request: {}", event.http_method);

        match event.http_method.as_str() {
            // Preflight never touches the store
            "OPTIONS" => Ok(TriggerResponse::preflight()),
            "GET" => self.handle_get(&event).await,
            "POST" => self.handle_post(&event).await,
            other => {
                tracing::warn!("❌ Method not allowed: {}", other);
                Ok(TriggerResponse::json(
                    405,
                    &json!({ "error": "Method not allowed" }),
                ))
            }
        }
    }

    /// GET: one project with its objects, or the full project listing
    async fn handle_get(&self, event: &TriggerEvent) -> Result<TriggerResponse> {
        match event.query_string_parameters.get("project_id") {
            Some(raw) => {
                let project_id: i64 = match raw.parse() {
                    Ok(id) => id,
                    Err(_) => {
                        tracing::warn!("❌ Non-numeric project_id: {:?}", raw);
                        return Ok(bad_request(format!("Invalid project_id: {raw}")));
                    }
                };

                let objects = self.storage.list_objects(project_id).await?;
                let project = self.storage.get_project(project_id).await?;

                tracing::debug!(
                    "📤 Project {} read: found={}, {} objects",
                    project_id,
                    project.is_some(),
                    objects.len()
                );
                Ok(TriggerResponse::json(
                    200,
                    &json!({ "project": project, "objects": objects }),
                ))
            }
            None => {
                let projects = self.storage.list_projects().await?;
                tracing::debug!("📤 Listing {} projects", projects.len());
                Ok(TriggerResponse::json(200, &json!({ "projects": projects })))
            }
        }
    }

    /// POST: dispatch on the `action` field of the JSON body
    ///
    /// An absent body reads as `{}`. Malformed JSON and unknown or
    /// incomplete actions answer 400 with the parse message; 405 is
    /// reserved for methods, a bad body is never a method error.
    async fn handle_post(&self, event: &TriggerEvent) -> Result<TriggerResponse> {
        let raw = event.body.as_deref().unwrap_or("{}");

        let body: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("❌ Malformed JSON body: {}", e);
                return Ok(bad_request(format!("Invalid JSON body: {e}")));
            }
        };

        let action: CanvasAction = match serde_json::from_value(body) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("❌ Invalid canvas action: {}", e);
                return Ok(bad_request(format!("Invalid request: {e}")));
            }
        };

        match action {
            CanvasAction::CreateProject { name, description } => {
                let project_id = self.storage.create_project(&name, &description).await?;
                tracing::info!("✅ Created project {} ({:?})", project_id, name);
                Ok(TriggerResponse::json(
                    201,
                    &json!({ "project_id": project_id }),
                ))
            }
            CanvasAction::SaveObjects { project_id, objects } => {
                self.storage.replace_objects(project_id, &objects).await?;
                tracing::info!(
                    "✅ Saved {} objects for project {}",
                    objects.len(),
                    project_id
                );
                Ok(TriggerResponse::json(200, &json!({ "success": true })))
            }
        }
    }
}

fn bad_request(message: String) -> TriggerResponse {
    TriggerResponse::json(400, &json!({ "error": message }))
}
