//! Common types and utilities shared across the NABat GRTS crates.

pub mod bbox;
pub mod error;
pub mod frame;

pub use bbox::BoundingBox;
pub use error::{MatchQuery, NabatError, NabatResult};
pub use frame::FrameName;
