//! # Menu API
//! 
//! HTTP handlers, DTOs, error mapping, and the router.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
