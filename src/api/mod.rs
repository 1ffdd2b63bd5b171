/// HTTP API layer
///
/// Adapts live HTTP requests to the normalized trigger contract and back.

pub mod canvas;

pub use canvas::{create_canvas_routes, AppState};
