//! Test support for the NABat GRTS workspace.
//!
//! - [`paths`]: where the fixture lookup tables live
//! - [`generators`]: synthetic `(frame_id, grts_id)` tables and temp lookup dirs
//! - [`fixtures`]: known points and cells that agree with the committed tables
//! - assertion macros for floating-point coordinates
//!
//! Pull it in as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Route `tracing` output through the test harness.
///
/// Filter comes from `RUST_LOG`, falling back to `warn`. Repeated calls are
/// no-ops once a global subscriber exists.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Resolve an optional data file via [`find_test_file`], or return early
/// from the calling test with a note on stderr.
///
/// ```ignore
/// #[test]
/// fn test_against_published_tables() {
///     let conus = require_test_file!("grts_lookup_published/Conus.csv");
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let name = $name;
        match $crate::find_test_file(name) {
            Some(found) => found,
            None => {
                eprintln!("skipping: '{}' not found (point {} at it)", name, $crate::TEST_DATA_ENV);
                return;
            }
        }
    }};
}

/// Assert `|left - right| <= epsilon`. NaN on either side fails.
///
/// ```ignore
/// assert_approx_eq!(x, -1485473.143, 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "values differ by {} (> {}): left {}, right {}",
            diff,
            epsilon,
            left,
            right
        );
    }};
}

/// [`assert_approx_eq!`] on both members of two `(x, y)` pairs.
///
/// ```ignore
/// assert_coords_approx_eq!(proj.forward(-96.0, 23.0), (0.0, 0.0), 1e-6);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (lx, ly) = $left;
        let (rx, ry) = $right;
        $crate::assert_approx_eq!(lx, rx, $epsilon);
        $crate::assert_approx_eq!(ly, ry, $epsilon);
    }};
}
