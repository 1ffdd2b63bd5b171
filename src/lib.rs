/// Canvas API: HTTP-triggered persistence for canvas projects and objects
///
/// This library maps three HTTP verbs onto a relational store of canvas
/// projects and their positioned objects, behind a normalized trigger
/// event/response contract.

// Core configuration and setup
pub mod config;

// Canvas domain layer - persisted entities, payload schemas, SQLite storage
pub mod canvas;

// Trigger layer - normalized event contract and request dispatch
pub mod trigger;

// HTTP API layer - axum adapter between live requests and the trigger contract
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use canvas::{CanvasObject, CanvasStorage, Project};
pub use server::start_server;
pub use trigger::{CanvasHandler, TriggerEvent, TriggerResponse};
