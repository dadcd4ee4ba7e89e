//! Generators for synthetic GRTS lookup tables.
//!
//! Tables are `(frame_id, grts_id)` pairs. The generators produce predictable
//! patterns so tests can compute expected values instead of hardcoding them.

use nabat_common::FrameName;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a sparse table covering every `stride`-th cell of a `cols x rows` grid.
///
/// GRTS IDs are assigned in reverse cell order, so the last sampled cell gets
/// GRTS ID 1. This keeps `frame_id != grts_id` for almost every entry, which
/// catches code that mixes the two up.
///
/// # Example
///
/// ```
/// use test_utils::sparse_cells;
///
/// let cells = sparse_cells(4, 3, 5);
/// assert_eq!(cells, vec![(1, 3), (6, 2), (11, 1)]);
/// ```
pub fn sparse_cells(cols: u32, rows: u32, stride: u32) -> Vec<(u32, u32)> {
    let total = cols * rows;
    let frame_ids: Vec<u32> = (1..=total).step_by(stride.max(1) as usize).collect();
    let count = frame_ids.len() as u32;
    frame_ids
        .into_iter()
        .enumerate()
        .map(|(i, frame_id)| (frame_id, count - i as u32))
        .collect()
}

/// Creates a table holding every cell of a `cols x rows` grid (GRTS ID = frame_id + offset).
pub fn dense_cells(cols: u32, rows: u32, offset: u32) -> Vec<(u32, u32)> {
    (1..=cols * rows).map(|id| (id, id + offset)).collect()
}

/// Renders a lookup table in the on-disk CSV layout.
pub fn lookup_csv(cells: &[(u32, u32)]) -> String {
    let mut out = String::from("frame_id,GRTS_ID\n");
    for (frame_id, grts_id) in cells {
        out.push_str(&format!("{},{}\n", frame_id, grts_id));
    }
    out
}

/// Writes `<dir>/<Frame>.csv` and returns its path.
pub fn write_lookup_csv(dir: &Path, frame: FrameName, cells: &[(u32, u32)]) -> PathBuf {
    let path = dir.join(format!("{}.csv", frame));
    fs::write(&path, lookup_csv(cells)).expect("Failed to write lookup table");
    path
}

/// Creates a temporary lookup directory holding the given tables.
pub fn lookup_dir_with(tables: &[(FrameName, Vec<(u32, u32)>)]) -> tempfile::TempDir {
    let dir = crate::temp_test_dir_with_prefix("grts_lookup_");
    for (frame, cells) in tables {
        write_lookup_csv(dir.path(), *frame, cells);
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_cells_unique_ids() {
        let cells = sparse_cells(463, 289, 97);
        let mut grts: Vec<u32> = cells.iter().map(|c| c.1).collect();
        grts.sort_unstable();
        grts.dedup();
        assert_eq!(grts.len(), cells.len());
        assert!(cells.iter().all(|(f, _)| *f >= 1 && *f <= 463 * 289));
    }

    #[test]
    fn test_dense_cells_cover_grid() {
        let cells = dense_cells(3, 2, 100);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (1, 101));
        assert_eq!(cells[5], (6, 106));
    }

    #[test]
    fn test_lookup_csv_layout() {
        let csv = lookup_csv(&[(1, 10), (2, 20)]);
        assert_eq!(csv, "frame_id,GRTS_ID\n1,10\n2,20\n");
    }

    #[test]
    fn test_lookup_dir_with_writes_files() {
        let dir = lookup_dir_with(&[(FrameName::Hawaii, vec![(1, 1)])]);
        assert!(dir.path().join("Hawaii.csv").exists());
        assert!(!dir.path().join("Conus.csv").exists());
    }
}
