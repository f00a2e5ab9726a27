// Project Index Server - backend for the static template editor
// Core library functionality

pub mod cli;
pub mod http;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::project_index::ProjectIndex;
pub use models::project_record::{ProjectMeta, ProjectRecord};
pub use models::sync_report::SyncReport;
pub use services::project_index_service::ProjectIndexService;
pub use services::project_store::{FsProjectStore, MemoryProjectStore, ProjectStore};
pub use utils::error::{EditorError, Result};
