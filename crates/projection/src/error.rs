//! Error types for projection setup and inversion.

use nabat_common::NabatError;
use thiserror::Error;

/// Errors raised while building or evaluating a projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A parameter is missing, malformed, or geometrically impossible.
    #[error("invalid projection parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The projection definition names something this crate does not implement.
    #[error("unsupported projection definition: {0}")]
    UnsupportedDefinition(String),

    /// Iterative latitude recovery did not settle.
    #[error("latitude iteration did not converge for ({x}, {y})")]
    NoConvergence { x: f64, y: f64 },

    /// The planar point has no geographic counterpart.
    #[error("point ({x}, {y}) is outside the projection domain")]
    OutOfDomain { x: f64, y: f64 },
}

impl ProjectionError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<ProjectionError> for NabatError {
    fn from(err: ProjectionError) -> Self {
        NabatError::Projection(err.to_string())
    }
}
