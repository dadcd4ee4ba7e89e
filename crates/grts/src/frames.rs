//! The NABat sampling frame catalog.
//!
//! Six fixed frames, each an Albers Equal-Area grid of square cells. The
//! catalog is built once per process from the constants below and never
//! changes afterwards.

use nabat_common::{BoundingBox, FrameName};
use once_cell::sync::Lazy;
use projection::{AlbersEqualArea, Ellipsoid};

/// ScienceBase WFS endpoint; `{id}` is the frame's catalog item.
const WFS_URL_TEMPLATE: &str = "https://www.sciencebase.gov/catalogMaps/mapping/ows/{id}?service=wfs";

/// Static parameters of one frame, as published with the NABat grids.
struct FrameParams {
    name: FrameName,
    /// `[min_x, min_y, max_x, max_y]`, meters
    bounds: [f64; 4],
    lat_1: f64,
    lat_2: f64,
    lat_0: f64,
    lon_0: f64,
    cell_size_m: f64,
    priority_cutoff: u32,
    catalog_id: &'static str,
}

// Order matches FrameName::ALL.
const FRAME_PARAMS: [FrameParams; 6] = [
    FrameParams {
        name: FrameName::Alaska,
        bounds: [-4280000.0, -730000.0, 3370000.0, 3720000.0],
        lat_1: 55.0,
        lat_2: 65.0,
        lat_0: 50.0,
        lon_0: -100.0,
        cell_size_m: 10000.0,
        priority_cutoff: 17142,
        catalog_id: "5b7b54efe4b0f5d578846149",
    },
    FrameParams {
        name: FrameName::Canada,
        bounds: [-4280000.0, -730000.0, 3370000.0, 3720000.0],
        lat_1: 55.0,
        lat_2: 65.0,
        lat_0: 50.0,
        lon_0: -100.0,
        cell_size_m: 10000.0,
        priority_cutoff: 16964,
        catalog_id: "5b7b559de4b0f5d57884614d",
    },
    FrameParams {
        name: FrameName::Conus,
        bounds: [-2363000.0, 276000.0, 2267000.0, 3166000.0],
        lat_1: 29.5,
        lat_2: 45.5,
        lat_0: 23.0,
        lon_0: -96.0,
        cell_size_m: 10000.0,
        priority_cutoff: 6714,
        catalog_id: "5b7b563ae4b0f5d57884615b",
    },
    FrameParams {
        name: FrameName::Hawaii,
        bounds: [-370000.0, 630000.0, 280000.0, 1080000.0],
        lat_1: 8.0,
        lat_2: 18.0,
        lat_0: 13.0,
        lon_0: -157.0,
        cell_size_m: 5000.0,
        priority_cutoff: 605,
        catalog_id: "5b7b5641e4b0f5d57884615d",
    },
    FrameParams {
        name: FrameName::Mexico,
        bounds: [-1650000.0, 300000.0, 1400000.0, 2400000.0],
        lat_1: 17.0,
        lat_2: 30.0,
        lat_0: 12.0,
        lon_0: -100.0,
        cell_size_m: 10000.0,
        priority_cutoff: 3240,
        catalog_id: "5b7b5658e4b0f5d57884615f",
    },
    FrameParams {
        name: FrameName::PuertoRico,
        bounds: [-170000.0, -50000.0, 230000.0, 100000.0],
        lat_1: 17.0,
        lat_2: 19.0,
        lat_0: 18.0,
        lon_0: -66.5,
        cell_size_m: 5000.0,
        priority_cutoff: 123,
        catalog_id: "5b7b5660e4b0f5d578846161",
    },
];

static FRAME_SPECS: Lazy<Vec<FrameSpec>> =
    Lazy::new(|| FRAME_PARAMS.iter().map(FrameSpec::from_params).collect());

/// Immutable description of one sampling frame's grid.
#[derive(Debug, Clone)]
pub struct FrameSpec {
    pub name: FrameName,
    /// Grid rectangle in the native projection (meters)
    pub bounds: BoundingBox,
    /// Native Albers projection (NAD83)
    pub projection: AlbersEqualArea,
    /// Cell edge length (meters)
    pub cell_size_m: f64,
    /// Number of grid columns
    pub cols: u32,
    /// Number of grid rows
    pub rows: u32,
    /// GRTS IDs at or below this value are the top 5% priority cells
    pub priority_cutoff: u32,
    /// ScienceBase catalog item hosting the frame's feature layer
    pub catalog_id: &'static str,
}

impl FrameSpec {
    fn from_params(params: &FrameParams) -> Self {
        let bounds = BoundingBox::from_array(params.bounds);
        Self {
            name: params.name,
            bounds,
            projection: AlbersEqualArea::new(
                params.lat_1,
                params.lat_2,
                params.lat_0,
                params.lon_0,
                0.0,
                0.0,
                Ellipsoid::GRS80,
            ),
            cell_size_m: params.cell_size_m,
            cols: (bounds.width() / params.cell_size_m) as u32,
            rows: (bounds.height() / params.cell_size_m) as u32,
            priority_cutoff: params.priority_cutoff,
            catalog_id: params.catalog_id,
        }
    }

    /// Parameters of a frame.
    pub fn get(frame: FrameName) -> &'static FrameSpec {
        &FRAME_SPECS[frame.index()]
    }

    /// Every frame spec, in [`FrameName::ALL`] order.
    pub fn all() -> &'static [FrameSpec] {
        &FRAME_SPECS
    }

    /// Total cells in the full rectangular grid, sampled or not.
    pub fn cell_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Whether a GRTS ID falls in the frame's top-priority band.
    pub fn is_high_priority(&self, grts_id: u32) -> bool {
        grts_id <= self.priority_cutoff
    }

    /// WFS endpoint serving this frame's cell features.
    pub fn wfs_url(&self) -> String {
        WFS_URL_TEMPLATE.replace("{id}", self.catalog_id)
    }
}
