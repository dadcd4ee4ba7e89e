//! Sampling frame names and alias normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NabatError, NabatResult};

/// The six NABat sampling frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrameName {
    Alaska,
    Canada,
    Conus,
    Hawaii,
    Mexico,
    PuertoRico,
}

/// Accepted spellings per frame, lowercase.
const ALIASES: [(FrameName, &[&str]); 6] = [
    (FrameName::Alaska, &["ak", "alaska"]),
    (FrameName::Canada, &["ca", "can", "canada"]),
    (FrameName::Conus, &["conus", "us", "usa", "united states"]),
    (FrameName::Hawaii, &["hi", "hawaii"]),
    (FrameName::Mexico, &["mex", "mx", "mexico"]),
    (FrameName::PuertoRico, &["pr", "puerto rico", "puertorico"]),
];

impl FrameName {
    /// All frames in canonical order.
    pub const ALL: [FrameName; 6] = [
        FrameName::Alaska,
        FrameName::Canada,
        FrameName::Conus,
        FrameName::Hawaii,
        FrameName::Mexico,
        FrameName::PuertoRico,
    ];

    /// Resolve a free-form frame name ("US", "conus", "Puerto Rico", ...).
    ///
    /// Matching is case-insensitive and exact against the alias table;
    /// surrounding whitespace is ignored.
    pub fn normalize(name: &str) -> NabatResult<Self> {
        let lowered = name.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(_, aliases)| aliases.contains(&lowered.as_str()))
            .map(|(frame, _)| *frame)
            .ok_or_else(|| NabatError::UnknownFrame(name.to_string()))
    }

    /// Canonical name, also the stem of the frame's lookup file.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameName::Alaska => "Alaska",
            FrameName::Canada => "Canada",
            FrameName::Conus => "Conus",
            FrameName::Hawaii => "Hawaii",
            FrameName::Mexico => "Mexico",
            FrameName::PuertoRico => "PuertoRico",
        }
    }

    /// Accepted aliases for this frame (lowercase).
    pub fn aliases(&self) -> &'static [&'static str] {
        ALIASES[self.index()].1
    }

    /// Position of this frame in [`FrameName::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for FrameName {
    type Err = NabatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for FrameName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
