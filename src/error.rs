//! Error types for body construction and world lookups.

use crate::shapes::ShapeKind;
use crate::world::BodyHandle;
use thiserror::Error;

/// Errors raised synchronously by setup and mutation calls.
///
/// Per-step numeric degeneracies (parallel edges, coincident centers) are
/// never reported here; the step recovers from them locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("invalid {shape} shape: {reason}")]
    InvalidShape {
        shape: ShapeKind,
        reason: &'static str,
    },

    #[error("mass must be a positive finite number, got {0}")]
    InvalidMass(f64),

    #[error("no body with handle {0}")]
    BodyNotFound(BodyHandle),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
