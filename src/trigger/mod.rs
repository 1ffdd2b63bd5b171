/// Trigger layer
///
/// The normalized event/response contract and the request handler that
/// dispatches events against the canvas store.

pub mod event;
pub mod handler;

pub use event::{TriggerEvent, TriggerResponse};
pub use handler::CanvasHandler;
