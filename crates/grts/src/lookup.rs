//! GRTS lookup tables and the sources they are loaded from.
//!
//! Each frame ships a two-column table mapping the cells the sampling design
//! kept (`frame_id`) to their GRTS priority order (`GRTS_ID`). Cells missing
//! from the table are not part of the design.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use nabat_common::{FrameName, NabatError, NabatResult};
use serde::Deserialize;

use crate::frames::FrameSpec;

/// One row of a lookup CSV. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct LookupRecord {
    frame_id: u32,
    #[serde(rename = "GRTS_ID")]
    grts_id: u32,
}

/// Bidirectional `frame_id <-> grts_id` table for one frame.
#[derive(Debug, Clone, Default)]
pub struct CellLookup {
    grts_by_frame_id: HashMap<u32, u32>,
    frame_id_by_grts: HashMap<u32, u32>,
}

impl CellLookup {
    /// Build a table from `(frame_id, grts_id)` pairs.
    ///
    /// Rejects frame IDs outside the frame's grid and duplicates on either side.
    pub fn from_pairs<I>(frame: FrameName, pairs: I) -> NabatResult<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let cell_count = FrameSpec::get(frame).cell_count();
        let pairs = pairs.into_iter();
        let (capacity, _) = pairs.size_hint();
        let mut table = Self {
            grts_by_frame_id: HashMap::with_capacity(capacity),
            frame_id_by_grts: HashMap::with_capacity(capacity),
        };

        for (frame_id, grts_id) in pairs {
            if frame_id == 0 || frame_id > cell_count {
                return Err(NabatError::lookup_load(
                    frame,
                    format!("frame_id {} is outside 1..={}", frame_id, cell_count),
                ));
            }
            if table.grts_by_frame_id.insert(frame_id, grts_id).is_some() {
                return Err(NabatError::lookup_load(
                    frame,
                    format!("duplicate frame_id {}", frame_id),
                ));
            }
            if table.frame_id_by_grts.insert(grts_id, frame_id).is_some() {
                return Err(NabatError::lookup_load(
                    frame,
                    format!("duplicate GRTS_ID {}", grts_id),
                ));
            }
        }

        Ok(table)
    }

    /// Parse a table from CSV with a `frame_id,GRTS_ID` header.
    pub fn from_csv_reader<R: Read>(frame: FrameName, reader: R) -> NabatResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for record in csv_reader.deserialize::<LookupRecord>() {
            let record = record.map_err(|e| NabatError::lookup_load(frame, e.to_string()))?;
            pairs.push((record.frame_id, record.grts_id));
        }

        Self::from_pairs(frame, pairs)
    }

    /// GRTS ID of a sampled cell.
    pub fn grts_id(&self, frame_id: u32) -> Option<u32> {
        self.grts_by_frame_id.get(&frame_id).copied()
    }

    /// Cell carrying a GRTS ID.
    pub fn frame_id(&self, grts_id: u32) -> Option<u32> {
        self.frame_id_by_grts.get(&grts_id).copied()
    }

    pub fn len(&self) -> usize {
        self.grts_by_frame_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grts_by_frame_id.is_empty()
    }

    /// `(frame_id, grts_id)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.grts_by_frame_id.iter().map(|(f, g)| (*f, *g))
    }
}

/// Where lookup tables come from.
pub trait LookupSource: fmt::Debug + Send + Sync {
    /// Load the full table for a frame.
    fn load(&self, frame: FrameName) -> NabatResult<CellLookup>;

    /// Human-readable origin of a frame's table, for logs.
    fn describe(&self, frame: FrameName) -> String;
}

/// Reads `<root>/<Frame>.csv`, e.g. `resources/grts_lookup/Conus.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a frame's table file.
    pub fn path_for(&self, frame: FrameName) -> PathBuf {
        self.root.join(format!("{}.csv", frame.as_str()))
    }
}

impl LookupSource for CsvDirectory {
    fn load(&self, frame: FrameName) -> NabatResult<CellLookup> {
        let path = self.path_for(frame);
        let file = File::open(&path).map_err(|e| {
            NabatError::lookup_load(frame, format!("cannot open {}: {}", path.display(), e))
        })?;
        CellLookup::from_csv_reader(frame, file)
    }

    fn describe(&self, frame: FrameName) -> String {
        self.path_for(frame).display().to_string()
    }
}

/// Tables held in memory; frames without a table fail to load.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<FrameName, Vec<(u32, u32)>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a frame's `(frame_id, grts_id)` pairs.
    pub fn with_table(mut self, frame: FrameName, cells: Vec<(u32, u32)>) -> Self {
        self.tables.insert(frame, cells);
        self
    }
}

impl LookupSource for InMemorySource {
    fn load(&self, frame: FrameName) -> NabatResult<CellLookup> {
        let cells = self
            .tables
            .get(&frame)
            .ok_or_else(|| NabatError::lookup_load(frame, "no table registered"))?;
        CellLookup::from_pairs(frame, cells.iter().copied())
    }

    fn describe(&self, frame: FrameName) -> String {
        format!("memory:{}", frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_reader() {
        let csv = "frame_id,GRTS_ID\n84817,1005\n1,697\n";
        let table = CellLookup::from_csv_reader(FrameName::Conus, csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.grts_id(84817), Some(1005));
        assert_eq!(table.frame_id(697), Some(1));
        assert_eq!(table.grts_id(2), None);
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let csv = "OBJECTID,frame_id,GRTS_ID,state\n7, 12 ,34,UT\n";
        let table = CellLookup::from_csv_reader(FrameName::Conus, csv.as_bytes()).unwrap();
        assert_eq!(table.grts_id(12), Some(34));
    }

    #[test]
    fn test_missing_column() {
        let csv = "frame_id,grts\n1,2\n";
        let err = CellLookup::from_csv_reader(FrameName::Conus, csv.as_bytes()).unwrap_err();
        assert!(matches!(err, NabatError::LookupLoad { .. }), "{:?}", err);
    }

    #[test]
    fn test_non_integer_value() {
        let csv = "frame_id,GRTS_ID\n1,2.5\n";
        assert!(CellLookup::from_csv_reader(FrameName::Conus, csv.as_bytes()).is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = CellLookup::from_pairs(FrameName::Hawaii, [(1, 1), (1, 2)]).unwrap_err();
        assert!(err.to_string().contains("duplicate frame_id 1"));
        let err = CellLookup::from_pairs(FrameName::Hawaii, [(1, 5), (2, 5)]).unwrap_err();
        assert!(err.to_string().contains("duplicate GRTS_ID 5"));
    }

    #[test]
    fn test_frame_id_range() {
        // Puerto Rico is 80 x 30
        assert!(CellLookup::from_pairs(FrameName::PuertoRico, [(2400, 1)]).is_ok());
        assert!(CellLookup::from_pairs(FrameName::PuertoRico, [(2401, 1)]).is_err());
        assert!(CellLookup::from_pairs(FrameName::PuertoRico, [(0, 1)]).is_err());
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new().with_table(FrameName::Mexico, vec![(10, 3)]);
        assert_eq!(source.load(FrameName::Mexico).unwrap().grts_id(10), Some(3));
        assert!(source.load(FrameName::Canada).is_err());
    }

    #[test]
    fn test_csv_directory_paths() {
        let source = CsvDirectory::new("/data/lookup");
        assert_eq!(
            source.path_for(FrameName::PuertoRico),
            PathBuf::from("/data/lookup/PuertoRico.csv")
        );
        let err = source.load(FrameName::PuertoRico).unwrap_err();
        assert!(err.to_string().contains("PuertoRico.csv"));
    }
}
