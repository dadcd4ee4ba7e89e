//! Common test fixtures for GRTS addressing tests.
//!
//! Values here agree with the committed lookup tables under
//! `crates/grts/testdata/grts_lookup/`.

/// A geographic point paired with the cell it is expected to resolve to.
#[derive(Debug, Clone, Copy)]
pub struct FixturePoint {
    pub lat: f64,
    pub lon: f64,
    /// Frame alias as a caller would type it
    pub frame: &'static str,
    /// Dense 1-based cell index in the frame
    pub frame_id: u32,
    /// GRTS ID the fixture table assigns to that cell
    pub grts_id: u32,
}

/// Known-good lookups.
pub mod points {
    use super::FixturePoint;

    /// West desert, Utah. Regression value from the published Conus table.
    pub const CONUS_UTAH: FixturePoint = FixturePoint {
        lat: 40.75384858,
        lon: -113.8450646,
        frame: "conus",
        frame_id: 84817,
        grts_id: 1005,
    };

    /// Mid-Atlantic; far east of the Conus frame rectangle.
    pub const MID_ATLANTIC: (f64, f64) = (35.0, -40.0);

    /// Gulf of Alaska; inside the Canada/Alaska rectangle but not in any fixture table.
    pub const GULF_OF_ALASKA: (f64, f64) = (57.0, -145.0);
}

/// Cells at the edges of a frame's grid, as `(frame_id, grts_id)` from the fixture tables.
pub mod edge_cells {
    /// Conus row 0, last column (col 462 of 463).
    pub const CONUS_ROW0_LAST_COL: (u32, u32) = (463, 319);

    /// Conus row 1, last column.
    pub const CONUS_ROW1_LAST_COL: (u32, u32) = (926, 1218);

    /// Conus row 0, first column.
    pub const CONUS_ROW0_FIRST_COL: (u32, u32) = (1, 697);
}

/// Frame-level constants from the NABat frame definitions.
pub mod frames {
    /// Grid dimensions `(cols, rows)` per canonical frame name.
    pub const DIMENSIONS: [(&str, u32, u32); 6] = [
        ("Alaska", 765, 445),
        ("Canada", 765, 445),
        ("Conus", 463, 289),
        ("Hawaii", 130, 90),
        ("Mexico", 305, 210),
        ("PuertoRico", 80, 30),
    ];

    /// Puerto Rico fixture cells at or under the priority cutoff (123), ascending.
    pub const PUERTO_RICO_HIGH_PRIORITY: [u32; 19] = [
        5, 17, 19, 26, 34, 44, 45, 54, 58, 59, 73, 75, 80, 84, 88, 89, 98, 106, 115,
    ];
}
