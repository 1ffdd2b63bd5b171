/// Canvas domain module
///
/// Handles the persisted entities (projects and objects), their boundary
/// payload schemas, and the SQLite storage layer behind them.

pub mod storage;
pub mod types;

pub use storage::CanvasStorage;
pub use types::{CanvasAction, CanvasObject, ObjectPayload, Project};
