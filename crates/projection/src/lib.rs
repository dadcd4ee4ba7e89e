//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.
//! Every NABat sampling frame is an Albers Equal-Area conic on the GRS80
//! ellipsoid; Lambert Conformal Conic and plain geographic coordinates are
//! available as output projections.

use std::fmt;

pub mod albers;
pub mod definition;
pub mod ellipsoid;
pub mod error;
pub mod geographic;
pub mod lambert;

pub use albers::AlbersEqualArea;
pub use definition::parse_projection;
pub use ellipsoid::Ellipsoid;
pub use error::ProjectionError;
pub use geographic::Geographic;
pub use lambert::LambertConformal;

/// A planar projection of geographic coordinates.
///
/// Geographic inputs and outputs are longitude/latitude in degrees on a
/// datum coincident with WGS84 (NAD83 is treated as identical).
pub trait Projection: fmt::Debug + Send + Sync {
    /// Project `(lon, lat)` in degrees to planar `(x, y)`.
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Unproject planar `(x, y)` back to `(lon, lat)` in degrees.
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError>;
}

/// Normalize an angle difference in radians to `[-π, π]`.
pub(crate) fn normalize_radians(mut angle: f64) -> f64 {
    use std::f64::consts::PI;

    if !angle.is_finite() {
        return angle;
    }
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
