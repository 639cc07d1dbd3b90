pub mod auth;
pub mod cors;
pub mod logging;
pub mod response;

pub use auth::bearer_auth_middleware;
pub use cors::cors_middleware;
pub use logging::request_logging_layer;
pub use response::{ApiResponse, ApiResult, StatusMarker};
