pub mod gateway;
pub mod options;

// Re-export from gateway.rs so callers can "use crate::gateway::ApiGateway;"
pub use gateway::{ApiGateway, ApiResponse};
pub use options::{RequestBody, RequestDefaults, RequestOptions, merge_headers};
