//! Lazily-loaded lookup tables for all frames.

use std::path::PathBuf;
use std::time::Instant;

use nabat_common::{FrameName, NabatResult};
use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::config::GrtsConfig;
use crate::frames::FrameSpec;
use crate::lookup::{CellLookup, CsvDirectory, LookupSource};

/// Holds one lookup table per frame, each loaded on first use.
///
/// Concurrent first requests for a frame block on a single load. A failed
/// load leaves the slot empty, so the next request tries again.
#[derive(Debug)]
pub struct FrameRegistry {
    source: Box<dyn LookupSource>,
    tables: [OnceCell<CellLookup>; 6],
}

impl FrameRegistry {
    /// Create a registry reading tables from `source`.
    pub fn new<S: LookupSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            tables: Default::default(),
        }
    }

    /// Registry backed by `<dir>/<Frame>.csv` files.
    pub fn with_lookup_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(CsvDirectory::new(dir))
    }

    /// Validate `config` and build a registry from it, preloading if asked.
    pub fn from_config(config: &GrtsConfig) -> NabatResult<Self> {
        config.validate()?;
        let registry = Self::with_lookup_dir(config.lookup_dir.clone());
        if config.preload {
            registry.preload_all()?;
        }
        Ok(registry)
    }

    /// Static parameters of a frame.
    pub fn spec(&self, frame: FrameName) -> &'static FrameSpec {
        FrameSpec::get(frame)
    }

    /// The frame's lookup table, loading it if needed.
    pub fn table(&self, frame: FrameName) -> NabatResult<&CellLookup> {
        self.tables[frame.index()].get_or_try_init(|| {
            let started = Instant::now();
            match self.source.load(frame) {
                Ok(table) => {
                    info!(
                        frame = %frame,
                        cells = table.len(),
                        source = %self.source.describe(frame),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Loaded GRTS lookup table"
                    );
                    Ok(table)
                }
                Err(e) => {
                    error!(frame = %frame, error = %e, "Failed to load GRTS lookup table");
                    Err(e)
                }
            }
        })
    }

    /// Load the given frames now. Stops at the first failure.
    pub fn preload(&self, frames: &[FrameName]) -> NabatResult<()> {
        for frame in frames {
            self.table(*frame)?;
        }
        Ok(())
    }

    /// Load every frame now.
    pub fn preload_all(&self) -> NabatResult<()> {
        self.preload(&FrameName::ALL)
    }

    /// Whether a frame's table is already in memory.
    pub fn is_loaded(&self, frame: FrameName) -> bool {
        self.tables[frame.index()].get().is_some()
    }

    pub fn source(&self) -> &dyn LookupSource {
        self.source.as_ref()
    }
}
