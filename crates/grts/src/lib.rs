//! GRTS grid addressing for the NABat sampling frames
//!
//! The North American Bat Monitoring Program divides each region into a grid
//! of equal-area cells and orders them with a Generalized Random Tessellation
//! Stratified (GRTS) draw. This crate translates between WGS84 coordinates,
//! grid cells, and GRTS IDs for the six published frames.
//!
//! # Architecture
//!
//! ```text
//! coordinate_to_grts(lat, lon, "US")
//!      │
//!      ├─► FrameName::normalize        ("US" → Conus)
//!      │
//!      ├─► FrameRegistry::table        (load <Frame>.csv once)
//!      │
//!      ├─► AlbersEqualArea::forward    (degrees → meters)
//!      │
//!      ├─► FrameSpec::cell_at          (meters → row, col → frame_id)
//!      │
//!      └─► CellLookup::grts_id         (frame_id → GRTS ID)
//!
//! grts_to_geometry(grts_id, frame, target, kind)
//!      │
//!      ├─► CellLookup::frame_id  ─►  FrameSpec::address_of  ─►  cell_bounds
//!      │
//!      └─► reproject 4 corners   ─►  Bounds | Polygon
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grts::{FrameRegistry, GeometryKind, TargetProjection};
//!
//! let registry = FrameRegistry::with_lookup_dir("resources/grts_lookup");
//!
//! let grts_id = registry.coordinate_to_grts(40.75384858, -113.8450646, "conus")?;
//! assert_eq!(grts_id, 1005);
//!
//! let cell = registry.grts_to_geometry(
//!     grts_id,
//!     "conus",
//!     &TargetProjection::Wgs84,
//!     GeometryKind::Polygon,
//! )?;
//! println!("{}", cell.to_geojson());
//! ```

pub mod config;
pub mod engine;
pub mod frames;
pub mod grid;
pub mod lookup;
pub mod registry;

use once_cell::sync::Lazy;
use tracing::warn;

// Re-export commonly used types at crate root
pub use config::{GrtsConfig, DEFAULT_LOOKUP_DIR};
pub use engine::{CellGeometry, GeometryKind, TargetProjection};
pub use frames::FrameSpec;
pub use grid::GridAddress;
pub use lookup::{CellLookup, CsvDirectory, InMemorySource, LookupSource};
pub use nabat_common::{BoundingBox, FrameName, MatchQuery, NabatError, NabatResult};
pub use registry::FrameRegistry;

static DEFAULT_REGISTRY: Lazy<FrameRegistry> = Lazy::new(|| {
    let config = GrtsConfig::from_env();
    let registry = FrameRegistry::with_lookup_dir(config.lookup_dir.clone());
    if config.preload {
        if let Err(e) = config.validate().and_then(|_| registry.preload_all()) {
            warn!(error = %e, "Preloading GRTS lookup tables failed; falling back to lazy loading");
        }
    }
    registry
});

/// Process-wide registry configured from `GRTS_LOOKUP_DIR` / `GRTS_PRELOAD`.
pub fn default_registry() -> &'static FrameRegistry {
    &DEFAULT_REGISTRY
}

/// Resolve a free-form frame name to its canonical frame.
pub fn normalize_frame(name: &str) -> NabatResult<FrameName> {
    FrameName::normalize(name)
}

/// Static parameters of a frame.
pub fn get_spec(frame: FrameName) -> &'static FrameSpec {
    FrameSpec::get(frame)
}

/// [`FrameRegistry::coordinate_to_grts`] on the default registry.
pub fn coordinate_to_grts(lat: f64, lon: f64, frame: &str) -> NabatResult<u32> {
    default_registry().coordinate_to_grts(lat, lon, frame)
}

/// [`FrameRegistry::grts_to_geometry`] on the default registry.
pub fn grts_to_geometry(
    grts_id: u32,
    frame: &str,
    target: &TargetProjection,
    kind: GeometryKind,
) -> NabatResult<CellGeometry> {
    default_registry().grts_to_geometry(grts_id, frame, target, kind)
}
