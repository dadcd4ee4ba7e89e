//! Coordinate ↔ GRTS cell translation.

use std::str::FromStr;
use std::sync::Arc;

use geo_types::{LineString, Polygon};
use nabat_common::{BoundingBox, FrameName, MatchQuery, NabatError, NabatResult};
use projection::{parse_projection, Projection};
use serde_json::{json, Value};
use tracing::debug;

use crate::registry::FrameRegistry;

const TARGET_PROJECTION_ALLOWED: &str =
    "'wgs84', 'native', or a projection definition (EPSG:5070, EPSG:3338, +proj=aea|lcc|longlat ...)";
const GEOMETRY_KIND_ALLOWED: &str = "'bounds', 'poly', or 'polygon'";

/// Coordinate system for returned cell geometries.
#[derive(Debug, Clone, Default)]
pub enum TargetProjection {
    /// The frame's own Albers meters.
    Native,
    /// Longitude/latitude degrees.
    #[default]
    Wgs84,
    /// Any other projection; corners go through WGS84 on the way.
    Custom(Arc<dyn Projection>),
}

impl TargetProjection {
    pub fn custom(projection: impl Projection + 'static) -> Self {
        Self::Custom(Arc::new(projection))
    }
}

impl FromStr for TargetProjection {
    type Err = NabatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wgs84" | "epsg:4326" => Ok(Self::Wgs84),
            "native" | "none" => Ok(Self::Native),
            _ => parse_projection(s).map(Self::Custom).map_err(|e| {
                NabatError::invalid_argument(
                    "target_projection",
                    s,
                    format!("{} ({})", TARGET_PROJECTION_ALLOWED, e),
                )
            }),
        }
    }
}

/// Shape of a returned cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryKind {
    /// `[min_x, min_y, max_x, max_y]` envelope.
    Bounds,
    /// Closed four-corner ring.
    #[default]
    Polygon,
}

impl FromStr for GeometryKind {
    type Err = NabatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bounds" => Ok(Self::Bounds),
            "poly" | "polygon" => Ok(Self::Polygon),
            _ => Err(NabatError::invalid_argument(
                "geometry_kind",
                s,
                GEOMETRY_KIND_ALLOWED,
            )),
        }
    }
}

/// A cell's footprint in the requested projection.
#[derive(Debug, Clone, PartialEq)]
pub enum CellGeometry {
    Bounds(BoundingBox),
    Polygon(Polygon<f64>),
}

impl CellGeometry {
    pub fn as_bounds(&self) -> Option<&BoundingBox> {
        match self {
            Self::Bounds(bounds) => Some(bounds),
            Self::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon<f64>> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            Self::Bounds(_) => None,
        }
    }

    /// Envelope of the geometry, whatever its kind. `None` for an empty polygon.
    pub fn envelope(&self) -> Option<BoundingBox> {
        match self {
            Self::Bounds(bounds) => Some(*bounds),
            Self::Polygon(polygon) => {
                BoundingBox::enclosing(polygon.exterior().coords().map(|c| (c.x, c.y)))
            }
        }
    }

    /// GeoJSON geometry object. Bounds render as a polygon carrying a `bbox` member.
    pub fn to_geojson(&self) -> Value {
        match self {
            Self::Bounds(bounds) => {
                let corners = bounds.corners();
                let ring: Vec<[f64; 2]> = corners
                    .iter()
                    .chain(corners.first())
                    .map(|&(x, y)| [x, y])
                    .collect();
                json!({
                    "type": "Polygon",
                    "bbox": bounds.to_array(),
                    "coordinates": [ring],
                })
            }
            Self::Polygon(polygon) => {
                let ring: Vec<[f64; 2]> = polygon
                    .exterior()
                    .coords()
                    .map(|c| [c.x, c.y])
                    .collect();
                json!({
                    "type": "Polygon",
                    "coordinates": [ring],
                })
            }
        }
    }
}

/// Shift longitudes by whole turns so consecutive corners stay within 180°
/// of the first one. Keeps cells on the antimeridian from spanning the globe.
fn unwrap_longitudes(ring: &mut [(f64, f64)]) {
    let Some(&(reference, _)) = ring.first() else {
        return;
    };
    for (lon, _) in ring.iter_mut().skip(1) {
        while *lon - reference > 180.0 {
            *lon -= 360.0;
        }
        while *lon - reference < -180.0 {
            *lon += 360.0;
        }
    }
}

impl FrameRegistry {
    /// GRTS ID of the cell containing a WGS84 coordinate.
    ///
    /// # Errors
    ///
    /// `UnknownFrame` for an unrecognized frame name, `LookupLoad` if the
    /// frame's table cannot be read, `NoMatch` if the point lies outside the
    /// frame grid or in a cell the sampling design does not include.
    pub fn coordinate_to_grts(&self, lat: f64, lon: f64, frame: &str) -> NabatResult<u32> {
        let frame = FrameName::normalize(frame)?;
        let spec = self.spec(frame);
        let table = self.table(frame)?;

        let no_match = || NabatError::NoMatch {
            query: MatchQuery::Coordinate { lat, lon },
            frame,
        };

        let Some(address) = spec.locate(lon, lat) else {
            debug!(frame = %frame, lat, lon, "Coordinate outside frame grid");
            return Err(no_match());
        };
        let frame_id = spec.frame_id(address);

        table.grts_id(frame_id).ok_or_else(|| {
            debug!(frame = %frame, lat, lon, frame_id, "Cell not in sampling frame");
            no_match()
        })
    }

    /// Footprint of a GRTS cell.
    ///
    /// # Errors
    ///
    /// `UnknownFrame`, `LookupLoad`, `NoMatch` when the GRTS ID is not in the
    /// frame, and `Projection` if a corner cannot be reprojected.
    pub fn grts_to_geometry(
        &self,
        grts_id: u32,
        frame: &str,
        target: &TargetProjection,
        kind: GeometryKind,
    ) -> NabatResult<CellGeometry> {
        let frame = FrameName::normalize(frame)?;
        let spec = self.spec(frame);
        let table = self.table(frame)?;

        let no_match = || NabatError::NoMatch {
            query: MatchQuery::GrtsId(grts_id),
            frame,
        };
        let address = table
            .frame_id(grts_id)
            .and_then(|frame_id| spec.address_of(frame_id))
            .ok_or_else(no_match)?;

        debug!(frame = %frame, grts_id, row = address.row, col = address.col, ?kind, "Building cell geometry");

        let mut ring = spec.cell_bounds(address).corners();
        match target {
            TargetProjection::Native => {}
            TargetProjection::Wgs84 => {
                for corner in ring.iter_mut() {
                    *corner = spec.projection.inverse(corner.0, corner.1)?;
                }
                unwrap_longitudes(&mut ring);
            }
            TargetProjection::Custom(projection) => {
                for corner in ring.iter_mut() {
                    let (lon, lat) = spec.projection.inverse(corner.0, corner.1)?;
                    *corner = projection.forward(lon, lat);
                }
            }
        }

        Ok(match kind {
            GeometryKind::Bounds => {
                let bounds = BoundingBox::enclosing(ring).ok_or_else(|| {
                    NabatError::Projection(format!("empty ring for GRTS ID {}", grts_id))
                })?;
                CellGeometry::Bounds(bounds)
            }
            GeometryKind::Polygon => {
                CellGeometry::Polygon(Polygon::new(LineString::from(ring.to_vec()), vec![]))
            }
        })
    }

    /// Cell carrying a GRTS ID, if the frame has it.
    pub fn grts_to_frame_id(&self, grts_id: u32, frame: &str) -> NabatResult<Option<u32>> {
        let frame = FrameName::normalize(frame)?;
        Ok(self.table(frame)?.frame_id(grts_id))
    }

    /// GRTS ID of a cell, if the cell is sampled.
    pub fn frame_id_to_grts(&self, frame_id: u32, frame: &str) -> NabatResult<Option<u32>> {
        let frame = FrameName::normalize(frame)?;
        Ok(self.table(frame)?.grts_id(frame_id))
    }

    /// Sorted GRTS IDs of the frame's top-priority cells.
    pub fn high_priority_cells(&self, frame: &str) -> NabatResult<Vec<u32>> {
        let frame = FrameName::normalize(frame)?;
        let spec = self.spec(frame);
        let mut ids: Vec<u32> = self
            .table(frame)?
            .iter()
            .map(|(_, grts_id)| grts_id)
            .filter(|grts_id| spec.is_high_priority(*grts_id))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
