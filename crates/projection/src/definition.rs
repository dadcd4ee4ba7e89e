//! Parsing of projection definitions.
//!
//! Accepts a small, well-defined subset of PROJ syntax:
//!
//! - `EPSG:4326`, `EPSG:5070` (CONUS Albers), `EPSG:3338` (Alaska Albers)
//! - `+proj=aea ...`, `+proj=lcc ...` with `lat_1`, `lat_2`, `lat_0`, `lon_0`,
//!   `x_0`, `y_0`, `ellps`/`datum` (GRS80, NAD83, WGS84) and `units=m`
//! - `+proj=longlat` (also `latlong`, `lonlat`, `latlon`)
//!
//! Datum shifts are not implemented; NAD83 and WGS84 are treated as coincident.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{AlbersEqualArea, Ellipsoid, Geographic, LambertConformal, Projection, ProjectionError};

/// Parse a projection definition into a shareable projection.
pub fn parse_projection(definition: &str) -> Result<Arc<dyn Projection>, ProjectionError> {
    let trimmed = definition.trim();

    match trimmed.to_uppercase().as_str() {
        "EPSG:4326" | "CRS:84" => return Ok(Arc::new(Geographic)),
        "EPSG:5070" => return Ok(Arc::new(AlbersEqualArea::conus())),
        "EPSG:3338" => return Ok(Arc::new(AlbersEqualArea::alaska())),
        _ => {}
    }

    let params = tokenize(trimmed);
    let proj = params
        .get("proj")
        .ok_or_else(|| ProjectionError::UnsupportedDefinition(trimmed.to_string()))?;

    if let Some(units) = params.get("units") {
        if *units != "m" {
            return Err(ProjectionError::UnsupportedDefinition(format!(
                "units={} (only meters are supported)",
                units
            )));
        }
    }
    if let Some(shift) = params.get("towgs84") {
        let is_null = shift
            .split(',')
            .all(|v| v.trim().parse::<f64>().map(|n| n == 0.0).unwrap_or(false));
        if !is_null {
            return Err(ProjectionError::UnsupportedDefinition(format!(
                "towgs84={} (datum shifts are not supported)",
                shift
            )));
        }
    }

    match *proj {
        "longlat" | "latlong" | "lonlat" | "latlon" => Ok(Arc::new(Geographic)),
        "aea" => {
            let p = ConicParams::from_map(&params)?;
            if (p.lat1 + p.lat2).abs() < 1e-10 {
                return Err(ProjectionError::invalid_parameter(
                    "lat_1",
                    "standard parallels must not be symmetric about the equator",
                ));
            }
            Ok(Arc::new(AlbersEqualArea::new(
                p.lat1, p.lat2, p.lat0, p.lon0, p.x0, p.y0, p.ellipsoid,
            )))
        }
        "lcc" => {
            let p = ConicParams::from_map(&params)?;
            if (p.lat1 + p.lat2).abs() < 1e-10 {
                return Err(ProjectionError::invalid_parameter(
                    "lat_1",
                    "standard parallels must not be symmetric about the equator",
                ));
            }
            Ok(Arc::new(LambertConformal::new(
                p.lat1, p.lat2, p.lat0, p.lon0, p.x0, p.y0, p.ellipsoid,
            )))
        }
        other => Err(ProjectionError::UnsupportedDefinition(format!("proj={}", other))),
    }
}

/// Split `+key=value +flag` tokens into a map; bare flags map to "".
fn tokenize(definition: &str) -> HashMap<&str, &str> {
    definition
        .split_whitespace()
        .map(|token| token.trim_start_matches('+'))
        .filter(|token| !token.is_empty())
        .map(|token| token.split_once('=').unwrap_or((token, "")))
        .collect()
}

/// Shared parameters of the two conic projections, in degrees/meters.
struct ConicParams {
    lat1: f64,
    lat2: f64,
    lat0: f64,
    lon0: f64,
    x0: f64,
    y0: f64,
    ellipsoid: Ellipsoid,
}

impl ConicParams {
    fn from_map(params: &HashMap<&str, &str>) -> Result<Self, ProjectionError> {
        let lat1 = number(params, "lat_1")?.ok_or_else(|| {
            ProjectionError::invalid_parameter("lat_1", "required for conic projections")
        })?;
        let lat2 = number(params, "lat_2")?.unwrap_or(lat1);
        let lat0 = number(params, "lat_0")?.unwrap_or(0.0);
        let lon0 = number(params, "lon_0")?.unwrap_or(0.0);
        let x0 = number(params, "x_0")?.unwrap_or(0.0);
        let y0 = number(params, "y_0")?.unwrap_or(0.0);

        for (name, value) in [("lat_1", lat1), ("lat_2", lat2), ("lat_0", lat0)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(ProjectionError::invalid_parameter(
                    name,
                    format!("{} is not a latitude", value),
                ));
            }
        }
        for (name, value) in [("lat_1", lat1), ("lat_2", lat2)] {
            if value.abs() == 90.0 {
                return Err(ProjectionError::invalid_parameter(
                    name,
                    "a standard parallel cannot be a pole",
                ));
            }
        }

        // ellps wins over datum, as in PROJ
        let ellipsoid = match params.get("ellps").or_else(|| params.get("datum")) {
            Some(name) => Ellipsoid::by_name(name).ok_or_else(|| {
                ProjectionError::UnsupportedDefinition(format!("ellipsoid/datum {}", name))
            })?,
            None => Ellipsoid::GRS80,
        };

        Ok(Self {
            lat1,
            lat2,
            lat0,
            lon0,
            x0,
            y0,
            ellipsoid,
        })
    }
}

fn number(params: &HashMap<&str, &str>, key: &str) -> Result<Option<f64>, ProjectionError> {
    params
        .get(key)
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| ProjectionError::invalid_parameter(key, format!("'{}' is not a number", raw)))
        })
        .transpose()
}
