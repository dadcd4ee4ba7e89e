//! Error types for NABat grid operations.

use std::fmt;

use thiserror::Error;

use crate::FrameName;

/// Result type alias using NabatError.
pub type NabatResult<T> = Result<T, NabatError>;

/// The query that failed to resolve against a frame's lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchQuery {
    /// A WGS84 coordinate pair.
    Coordinate { lat: f64, lon: f64 },
    /// A GRTS cell identifier.
    GrtsId(u32),
}

impl fmt::Display for MatchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchQuery::Coordinate { lat, lon } => write!(f, "coordinates ({}, {})", lat, lon),
            MatchQuery::GrtsId(id) => write!(f, "GRTS ID ({})", id),
        }
    }
}

/// Primary error type for grid addressing.
#[derive(Debug, Error)]
pub enum NabatError {
    #[error(
        "the grid frame name '{0}' is not one of 'Alaska', 'Canada', 'Conus', 'Hawaii', 'Mexico', or 'PuertoRico'"
    )]
    UnknownFrame(String),

    /// Covers both points outside the frame rectangle and cells the sampling
    /// design left unassigned.
    #[error("the provided {query} do not have a match in the {frame} frame")]
    NoMatch { query: MatchQuery, frame: FrameName },

    #[error("invalid value '{value}' for '{param}': must be one of {allowed}")]
    InvalidArgument {
        param: String,
        value: String,
        allowed: String,
    },

    #[error("failed to load the {frame} lookup table: {message}")]
    LookupLoad { frame: FrameName, message: String },

    #[error("projection error: {0}")]
    Projection(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl NabatError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(
        param: impl Into<String>,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            param: param.into(),
            value: value.into(),
            allowed: allowed.into(),
        }
    }

    /// Create a LookupLoad error.
    pub fn lookup_load(frame: FrameName, message: impl Into<String>) -> Self {
        Self::LookupLoad {
            frame,
            message: message.into(),
        }
    }

    /// True for the `NoMatch` kind, whatever the query was.
    pub fn is_no_match(&self) -> bool {
        matches!(self, NabatError::NoMatch { .. })
    }
}
