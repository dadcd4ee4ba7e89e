//! Albers Equal-Area Conic projection.
//!
//! Every NABat sampling frame lays its grid out in an Albers Equal-Area
//! projection on the GRS80 ellipsoid (NAD83). Equal-area matters here: each
//! 10 km (or 5 km) grid cell covers the same ground area wherever it sits
//! in the frame.
//!
//! The projection parameters include:
//! - Standard parallels (lat_1, lat_2): where the cone cuts the ellipsoid
//! - Latitude of origin (lat_0): where y = 0
//! - Central meridian (lon_0): where x = 0
//! - False easting/northing (x_0, y_0)
//!
//! Formulas follow Snyder, "Map Projections: A Working Manual" (USGS PP 1395),
//! equations 14-1 through 14-21 (ellipsoidal form).

use std::f64::consts::FRAC_PI_2;

use crate::{normalize_radians, Ellipsoid, Projection, ProjectionError};

/// Iteration cap for the inverse latitude series.
const MAX_ITERATIONS: usize = 25;

/// Convergence tolerance for the inverse latitude (radians).
const TOLERANCE: f64 = 1e-12;

/// Albers Equal-Area Conic projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbersEqualArea {
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
    /// C constant
    c: f64,
    /// Rho at the latitude of origin
    rho0: f64,
}

impl AlbersEqualArea {
    /// Create a new Albers projection from parameters in degrees.
    ///
    /// # Arguments
    /// * `lat1_deg` - First standard parallel
    /// * `lat2_deg` - Second standard parallel (equal to `lat1_deg` for a tangent cone)
    /// * `lat0_deg` - Latitude of origin
    /// * `lon0_deg` - Central meridian
    /// * `x0`, `y0` - False easting and northing (meters)
    /// * `ellipsoid` - Reference ellipsoid
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

        let e2 = ellipsoid.e2();
        let e = ellipsoid.e();

        let m1 = m(lat1, e2);
        let m2 = m(lat2, e2);
        let q1 = q(lat1, e, e2);
        let q2 = q(lat2, e, e2);
        let q0 = q(lat0, e, e2);

        // Cone constant: tangent cone when both parallels coincide
        let n = if (lat1 - lat2).abs() < 1e-10 {
            lat1.sin()
        } else {
            (m1 * m1 - m2 * m2) / (q2 - q1)
        };

        let c = m1 * m1 + n * q1;
        let rho0 = ellipsoid.a * (c - n * q0).sqrt() / n;

        Self {
            lat1,
            lat2,
            lat0,
            lon0,
            x0,
            y0,
            ellipsoid,
            n,
            c,
            rho0,
        }
    }

    /// CONUS Albers (EPSG:5070): 29.5°N / 45.5°N, origin 23°N 96°W, NAD83.
    pub fn conus() -> Self {
        Self::new(29.5, 45.5, 23.0, -96.0, 0.0, 0.0, Ellipsoid::GRS80)
    }

    /// Alaska Albers (EPSG:3338): 55°N / 65°N, origin 50°N 154°W, NAD83.
    pub fn alaska() -> Self {
        Self::new(55.0, 65.0, 50.0, -154.0, 0.0, 0.0, Ellipsoid::GRS80)
    }

    /// Cone constant n.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Recover latitude (radians) from the authalic quantity q.
    fn latitude_from_q(&self, qv: f64, x: f64, y: f64) -> Result<f64, ProjectionError> {
        let e = self.ellipsoid.e();
        let e2 = self.ellipsoid.e2();

        if e < 1e-12 {
            let s = qv / 2.0;
            if s.abs() > 1.0 {
                return Err(ProjectionError::OutOfDomain { x, y });
            }
            return Ok(s.asin());
        }

        let q_pole = q(FRAC_PI_2, e, e2);
        if !qv.is_finite() || qv.abs() > q_pole + TOLERANCE {
            return Err(ProjectionError::OutOfDomain { x, y });
        }
        if (qv.abs() - q_pole).abs() <= TOLERANCE {
            return Ok(FRAC_PI_2.copysign(qv));
        }

        let mut phi = (qv / 2.0).asin();
        for _ in 0..MAX_ITERATIONS {
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();
            let one_minus = 1.0 - e2 * sin_phi * sin_phi;
            let delta = one_minus * one_minus / (2.0 * cos_phi)
                * (qv / (1.0 - e2) - sin_phi / one_minus
                    + (1.0 / (2.0 * e)) * ((1.0 - e * sin_phi) / (1.0 + e * sin_phi)).ln());
            phi += delta;
            if delta.abs() < TOLERANCE {
                return Ok(phi);
            }
        }

        Err(ProjectionError::NoConvergence { x, y })
    }
}

impl Projection for AlbersEqualArea {
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let e = self.ellipsoid.e();
        let e2 = self.ellipsoid.e2();

        let phi = lat.to_radians();
        let dlon = normalize_radians(lon.to_radians() - self.lon0);

        let rho = self.ellipsoid.a * (self.c - self.n * q(phi, e, e2)).sqrt() / self.n;
        let theta = self.n * dlon;

        let x = self.x0 + rho * theta.sin();
        let y = self.y0 + self.rho0 - rho * theta.cos();
        (x, y)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let px = x - self.x0;
        let py = y - self.y0;
        let dy = self.rho0 - py;

        // For a cone opening south (n < 0) the signs of x, y and rho flip
        let (rho, theta) = if self.n >= 0.0 {
            (px.hypot(dy), px.atan2(dy))
        } else {
            (-px.hypot(dy), (-px).atan2(-dy))
        };

        let a = self.ellipsoid.a;
        let qv = (self.c - (rho * self.n / a).powi(2)) / self.n;
        let phi = self.latitude_from_q(qv, x, y)?;
        let lon = normalize_radians(self.lon0 + theta / self.n);

        Ok((lon.to_degrees(), phi.to_degrees()))
    }
}

/// Snyder eq. 14-15.
fn m(phi: f64, e2: f64) -> f64 {
    let s = phi.sin();
    phi.cos() / (1.0 - e2 * s * s).sqrt()
}

/// Snyder eq. 3-12, the authalic quantity.
fn q(phi: f64, e: f64, e2: f64) -> f64 {
    let s = phi.sin();
    if e < 1e-12 {
        return 2.0 * s;
    }
    (1.0 - e2) * (s / (1.0 - e2 * s * s) - (1.0 / (2.0 * e)) * ((1.0 - e * s) / (1.0 + e * s)).ln())
}
