//! Errors and error reporting for the orb simulation
//!
//! Every fallible operation on the core rejects bad input before touching
//! any state, so a returned error always means "nothing changed".

use thiserror::Error;

/// Error returned when a value handed to the simulation would break one of
/// its invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("mass must be a finite positive number, got {0}")]
    InvalidMass(f64),

    #[error("radius must be a finite positive number, got {0}")]
    InvalidRadius(f64),

    #[error("{field} must have finite components")]
    NonFiniteVector { field: &'static str },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SimError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Format a simulation error for display to users
pub fn format_sim_error(error: &SimError) -> String {
    format!("Simulation error: {}", error)
}

/// Format a runtime error with context
pub fn format_runtime_error(error: &dyn std::error::Error) -> String {
    format!("Runtime error: {}", error)
}
