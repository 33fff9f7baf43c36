//! Error types for the physics core and the simulation boundary.

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Failures raised by the vector/body primitives.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    #[error("division of a vector by zero")]
    DivisionByZero,
}

/// Errors surfaced through the simulation interface.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Body '{0}' not found")]
    BodyNotFound(String),

    #[error("Body '{0}' already exists")]
    DuplicateBody(String),

    #[error("Invalid mass for '{name}': {mass} (must be finite and > 0)")]
    InvalidMass { name: String, mass: f64 },

    #[error("Invalid radius for '{name}': {radius} (must be finite and >= 0)")]
    InvalidRadius { name: String, radius: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for the lookup failure the boundary maps to "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, SimError::BodyNotFound(_))
    }
}
