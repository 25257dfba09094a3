//! # Menu Core
//! 
//! Domain entities, the node store port, and the menu tree service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
