//! Reference ellipsoids.

/// A reference ellipsoid defined by its semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    /// GRS 1980, the ellipsoid of NAD83.
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// WGS 1984.
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257223563,
    };

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// First eccentricity.
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Look up an ellipsoid by its proj `ellps`/`datum` name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "GRS80" | "NAD83" => Some(Self::GRS80),
            "WGS84" => Some(Self::WGS84),
            _ => None,
        }
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::GRS80
    }
}
