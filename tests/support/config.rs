use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file in its own temporary directory.
pub struct TempConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn write_temp_config(contents: &str) -> TempConfig {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    TempConfig { dir, path }
}

/// Minimal valid config with one watched pair.
pub const MINIMAL_TOML: &str = r#"
poll_seconds = 5

[[watchlist]]
network = "bsc"
pair_address = "0xpair"

[telegram]
enabled = false
"#;
