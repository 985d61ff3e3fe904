//! HTTP API module: earthquake feed, view model, health, metrics and the
//! static browser client.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::create_router;
