//! Geographic (longitude/latitude) pass-through projection.

use crate::{Projection, ProjectionError};

/// Identity projection: planar coordinates are longitude/latitude degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geographic;

impl Projection for Geographic {
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        (lon, lat)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        if !(-90.0..=90.0).contains(&y) {
            return Err(ProjectionError::OutOfDomain { x, y });
        }
        Ok((x, y))
    }
}
