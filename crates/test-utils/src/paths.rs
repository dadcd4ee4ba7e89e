//! Locating lookup-table fixtures on disk.

use std::path::{Path, PathBuf};

/// Variable naming an extra directory of lookup tables (e.g. the full published set).
pub const TEST_DATA_ENV: &str = "TEST_DATA_DIR";

/// Root of the workspace, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    here.ancestors()
        .nth(2)
        .unwrap_or(here)
        .to_path_buf()
}

/// `crates/<crate_name>/testdata` in the workspace.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    let mut dir = workspace_root();
    dir.extend(["crates", crate_name, "testdata"]);
    dir
}

/// Committed fixture tables, one `<Frame>.csv` per sampling frame.
pub fn fixture_lookup_dir() -> PathBuf {
    crate_testdata_dir("grts").join("grts_lookup")
}

/// First existing match for `name`, looked up relative to (in order)
/// `$TEST_DATA_DIR`, the grts testdata directory, the fixture table
/// directory and `<workspace>/testdata`.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let from_env = std::env::var_os(TEST_DATA_ENV).map(PathBuf::from);
    let search = [
        from_env,
        Some(crate_testdata_dir("grts")),
        Some(fixture_lookup_dir()),
        Some(workspace_root().join("testdata")),
    ];

    search
        .into_iter()
        .flatten()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Scratch directory removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    temp_test_dir_with_prefix("nabat_")
}

/// Scratch directory whose name starts with `prefix`.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .unwrap_or_else(|e| panic!("cannot create scratch dir '{}*': {}", prefix, e))
}
