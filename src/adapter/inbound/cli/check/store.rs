use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{config, output};
use crate::domain::alert::AlertRecord;
use crate::error::{DeliveryError, Result};
use crate::infrastructure::bootstrap;

/// Insert a synthetic alert into every enabled record store.
pub async fn execute_store<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = config::load(config_path.as_ref())?;
    let recorders = bootstrap::build_recorder_registry(&config)?;

    if recorders.is_empty() {
        if output::is_json() {
            output::json_output(json!({
                "command": "check.store",
                "stores": [],
                "status": "none",
            }));
        } else {
            output::section("Store Check");
            output::warning("No record store is enabled");
            output::hint("enable [supabase] or [sqlite] in the config");
        }
        return Ok(());
    }

    if !output::is_json() {
        output::section("Store Check");
        output::action("Inserting", "test alert");
    }

    let probe = AlertRecord::probe(chrono::Utc::now().timestamp());
    let results = recorders.record_each(&probe).await;
    let failed = results.iter().filter(|(_, result)| result.is_err()).count();

    if output::is_json() {
        let stores: Vec<_> = results
            .iter()
            .map(|(name, result)| match result {
                Ok(()) => json!({ "store": name, "status": "ok" }),
                Err(e) => json!({ "store": name, "status": "failed", "error": e.to_string() }),
            })
            .collect();
        output::json_output(json!({
            "command": "check.store",
            "stores": stores,
            "status": if failed == 0 { "ok" } else { "failed" },
        }));
    } else {
        for (name, result) in &results {
            match result {
                Ok(()) => output::success(&format!("{name}: test alert stored")),
                Err(e) => output::error(&format!("{name}: {e}")),
            }
        }
    }

    if failed > 0 {
        return Err(DeliveryError::Store(format!(
            "{failed} of {} stores failed",
            results.len()
        ))
        .into());
    }
    Ok(())
}
