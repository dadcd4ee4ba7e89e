//! Configuration for the GRTS lookup engine.

use std::path::PathBuf;

use nabat_common::{NabatError, NabatResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default location of the per-frame lookup tables, relative to the working directory.
pub const DEFAULT_LOOKUP_DIR: &str = "resources/grts_lookup";

/// Configuration for a [`FrameRegistry`](crate::FrameRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrtsConfig {
    /// Directory holding `<Frame>.csv` lookup tables.
    pub lookup_dir: PathBuf,

    /// Load every frame's table up front instead of on first use.
    pub preload: bool,
}

impl Default for GrtsConfig {
    fn default() -> Self {
        Self {
            lookup_dir: PathBuf::from(DEFAULT_LOOKUP_DIR),
            preload: false,
        }
    }
}

impl GrtsConfig {
    /// Load configuration from environment variables.
    ///
    /// - `GRTS_LOOKUP_DIR`: lookup table directory
    /// - `GRTS_PRELOAD`: `true`/`1` to load all tables eagerly
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = var("GRTS_LOOKUP_DIR") {
            let val = val.trim();
            if val.is_empty() {
                warn!("GRTS_LOOKUP_DIR is empty, using {}", DEFAULT_LOOKUP_DIR);
            } else {
                config.lookup_dir = PathBuf::from(val);
            }
        }

        if let Some(val) = var("GRTS_PRELOAD") {
            match val.trim().to_lowercase().as_str() {
                "true" | "1" => config.preload = true,
                "false" | "0" | "" => config.preload = false,
                other => warn!(value = other, "Ignoring unrecognized GRTS_PRELOAD value"),
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> NabatResult<()> {
        if self.lookup_dir.as_os_str().is_empty() {
            return Err(NabatError::Config("lookup_dir must not be empty".to_string()));
        }

        if self.preload && !self.lookup_dir.is_dir() {
            return Err(NabatError::Config(format!(
                "lookup_dir {} is not a directory (required when preload is enabled)",
                self.lookup_dir.display()
            )));
        }

        Ok(())
    }
}
