//! Lambert Conformal Conic projection.
//!
//! Offered as an output projection for cell geometries (e.g. to line cells
//! up with state plane zones). It maps a cone tangent or
//! secant to the ellipsoid onto a flat plane, preserving angles.
//!
//! The projection parameters include:
//! - Standard parallel(s): lat_1 and lat_2 (equal for a tangent cone)
//! - Latitude of origin (lat_0) and central meridian (lon_0)
//! - False easting/northing (x_0, y_0), meters
//!
//! Formulas follow Snyder equations 15-1 through 15-11 (ellipsoidal form).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::{normalize_radians, Ellipsoid, Projection, ProjectionError};

const MAX_ITERATIONS: usize = 25;
const TOLERANCE: f64 = 1e-12;

/// Lambert Conformal Conic projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LambertConformal {
    /// First standard parallel in radians
    pub lat1: f64,
    /// Second standard parallel in radians
    pub lat2: f64,
    /// Latitude of origin in radians
    pub lat0: f64,
    /// Central meridian in radians
    pub lon0: f64,
    /// False easting (meters)
    pub x0: f64,
    /// False northing (meters)
    pub y0: f64,
    /// Reference ellipsoid
    pub ellipsoid: Ellipsoid,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the latitude of origin
    rho0: f64,
}

impl LambertConformal {
    /// Create a new Lambert Conformal projection from parameters in degrees.
    pub fn new(
        lat1_deg: f64,
        lat2_deg: f64,
        lat0_deg: f64,
        lon0_deg: f64,
        x0: f64,
        y0: f64,
        ellipsoid: Ellipsoid,
    ) -> Self {
        let lat1 = lat1_deg.to_radians();
        let lat2 = lat2_deg.to_radians();
        let lat0 = lat0_deg.to_radians();
        let lon0 = lon0_deg.to_radians();

        let e = ellipsoid.e();
        let e2 = ellipsoid.e2();

        let m1 = m(lat1, e2);
        let t1 = t(lat1, e);

        // Compute cone constant n
        let n = if (lat1 - lat2).abs() < 1e-10 {
            // Tangent cone (single standard parallel)
            lat1.sin()
        } else {
            // Secant cone (two standard parallels)
            (m1.ln() - m(lat2, e2).ln()) / (t1.ln() - t(lat2, e).ln())
        };

        let f = m1 / (n * t1.powf(n));
        let rho0 = ellipsoid.a * f * t(lat0, e).powf(n);

        Self {
            lat1,
            lat2,
            lat0,
            lon0,
            x0,
            y0,
            ellipsoid,
            n,
            f,
            rho0,
        }
    }

    /// Cone constant n.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

impl Projection for LambertConformal {
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let e = self.ellipsoid.e();
        let phi = lat.to_radians();
        let dlon = normalize_radians(lon.to_radians() - self.lon0);

        let rho = self.ellipsoid.a * self.f * t(phi, e).powf(self.n);
        let theta = self.n * dlon;

        (
            self.x0 + rho * theta.sin(),
            self.y0 + self.rho0 - rho * theta.cos(),
        )
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let e = self.ellipsoid.e();
        let px = x - self.x0;
        let dy = self.rho0 - (y - self.y0);

        let (rho, theta) = if self.n >= 0.0 {
            (px.hypot(dy), px.atan2(dy))
        } else {
            (-px.hypot(dy), (-px).atan2(-dy))
        };

        if rho == 0.0 {
            // Apex of the cone is the pole on the cone's side
            let lat = FRAC_PI_2.copysign(self.n);
            return Ok((self.lon0.to_degrees(), lat.to_degrees()));
        }

        let tv = (rho / (self.ellipsoid.a * self.f)).powf(1.0 / self.n);
        if !tv.is_finite() {
            return Err(ProjectionError::OutOfDomain { x, y });
        }

        let mut phi = FRAC_PI_2 - 2.0 * tv.atan();
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let es = e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (tv * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
            let delta = (next - phi).abs();
            phi = next;
            if delta < TOLERANCE {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(ProjectionError::NoConvergence { x, y });
        }

        let lon = normalize_radians(self.lon0 + theta / self.n);
        Ok((lon.to_degrees(), phi.to_degrees()))
    }
}

/// Snyder eq. 14-15.
fn m(phi: f64, e2: f64) -> f64 {
    let s = phi.sin();
    phi.cos() / (1.0 - e2 * s * s).sqrt()
}

/// Snyder eq. 15-9.
fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}
