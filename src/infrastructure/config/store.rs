//! Record sink configuration.

use serde::Deserialize;

use super::telegram::env_value;
use crate::adapter::outbound::supabase::SupabaseConfig;

/// Supabase settings (`[supabase]`).
///
/// `SUPABASE_URL` and `SUPABASE_ANON_KEY` override the file values.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseAppConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "alerts".into()
}

impl Default for SupabaseAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            anon_key: None,
            table: default_table(),
        }
    }
}

impl SupabaseAppConfig {
    pub(super) fn apply_env(&mut self) {
        if let Some(url) = env_value("SUPABASE_URL") {
            self.url = Some(url);
        }
        if let Some(key) = env_value("SUPABASE_ANON_KEY") {
            self.anon_key = Some(key);
        }
    }

    /// Connection settings when Supabase is enabled and fully configured.
    #[must_use]
    pub fn resolved(&self) -> Option<SupabaseConfig> {
        if !self.enabled {
            return None;
        }
        Some(SupabaseConfig {
            url: self.url.clone()?,
            anon_key: self.anon_key.clone()?,
            table: self.table.clone(),
        })
    }
}

/// Local SQLite alert store settings (`[sqlite]`).
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteAppConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_sqlite_path")]
    pub path: String,
}

fn default_sqlite_path() -> String {
    "pairpulse.db".into()
}

impl Default for SqliteAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_sqlite_path(),
        }
    }
}
