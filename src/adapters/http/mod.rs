//! HTTP adapter. axum server exposing the advisor endpoints.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use server::{ApiServer, router};
