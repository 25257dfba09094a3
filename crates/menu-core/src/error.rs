//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu with ID {0} not found")]
    MenuNotFound(Uuid),

    #[error("Cannot move menu {menu_id} under {parent_id}: a menu cannot become its own ancestor")]
    CycleDetected { menu_id: Uuid, parent_id: Uuid },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
