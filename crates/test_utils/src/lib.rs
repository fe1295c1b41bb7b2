use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

static LOGGER: Lazy<()> = Lazy::new(|| {
    // Tests run in parallel; only the first caller installs the subscriber.
    let _ = logging::try_init_logger_with("debug");
});

/// Install the debug-level test subscriber so render rejections show up in the
/// output of failing tests. Safe to call from every test.
pub fn init_test_logger() {
    Lazy::force(&LOGGER);
}

/// Write `contents` to `root/relative`, creating parent directories as needed.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture directory");
    }
    fs::write(&path, contents).expect("write fixture file");
    path
}

/// Directory holding the YAML fixtures shared by the workspace tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}
