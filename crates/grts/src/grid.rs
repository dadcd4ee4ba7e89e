//! Cell addressing within a frame's rectangular grid.
//!
//! Cells are numbered row-major from the frame's lower-left corner:
//! `frame_id = row * cols + col + 1`. Row 0 is the southernmost row and
//! column 0 the westernmost column.

use nabat_common::BoundingBox;
use projection::Projection;

use crate::frames::FrameSpec;

/// Zero-based position of a cell in its frame's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridAddress {
    pub row: u32,
    pub col: u32,
}

impl FrameSpec {
    /// Cell containing a native-projection point, or `None` outside the grid.
    ///
    /// Cells are half-open: a point on a cell's west or south edge belongs to
    /// it, one on the east or north edge belongs to the neighbor. The frame's
    /// own east and north edges are therefore outside the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<GridAddress> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let col = ((x - self.bounds.min_x) / self.cell_size_m).floor();
        let row = ((y - self.bounds.min_y) / self.cell_size_m).floor();

        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }

        Some(GridAddress {
            row: row as u32,
            col: col as u32,
        })
    }

    /// Cell containing a WGS84 coordinate.
    pub fn locate(&self, lon: f64, lat: f64) -> Option<GridAddress> {
        let (x, y) = self.projection.forward(lon, lat);
        self.cell_at(x, y)
    }

    /// One-based identifier of a cell.
    pub fn frame_id(&self, address: GridAddress) -> u32 {
        address.row * self.cols + address.col + 1
    }

    /// Inverse of [`frame_id`](Self::frame_id). `None` for ids outside `1..=cols*rows`.
    pub fn address_of(&self, frame_id: u32) -> Option<GridAddress> {
        if frame_id == 0 || frame_id > self.cell_count() {
            return None;
        }
        let index = frame_id - 1;
        Some(GridAddress {
            row: index / self.cols,
            col: index % self.cols,
        })
    }

    /// Native-projection rectangle of a cell.
    pub fn cell_bounds(&self, address: GridAddress) -> BoundingBox {
        let min_x = self.bounds.min_x + address.col as f64 * self.cell_size_m;
        let min_y = self.bounds.min_y + address.row as f64 * self.cell_size_m;
        BoundingBox::new(min_x, min_y, min_x + self.cell_size_m, min_y + self.cell_size_m)
    }
}
