use std::path::PathBuf;

use pairpulse::adapter::outbound::sqlite::SqliteAlertRecorder;
use tempfile::TempDir;

/// Temporary SQLite alert store, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    recorder: SqliteAlertRecorder,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("pairpulse-{name}.db"));
        let recorder =
            SqliteAlertRecorder::open(&path.to_string_lossy()).expect("open sqlite store");
        Self {
            _dir: dir,
            path,
            recorder,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn recorder(&self) -> SqliteAlertRecorder {
        self.recorder.clone()
    }
}
