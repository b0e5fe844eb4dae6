//! List command implementation

use std::path::Path;

use anyhow::Result;

use grimoire_registry::{enumerate, output};

pub fn cmd_list(root: &Path, json: bool) -> Result<()> {
    let entries = enumerate(root)?;

    if json {
        let _ = output::emit(serde_json::json!({
            "event": "start",
            "command": "list",
            "root": root.display().to_string(),
        }));
        for identity in &entries {
            let _ = output::emit(serde_json::json!({
                "event": "entry",
                "entry": identity.to_string(),
                "owner": identity.owner,
                "repo": identity.repo,
                "subpackage": identity.is_subpackage(),
            }));
        }
        let _ = output::emit(serde_json::json!({
            "event": "complete",
            "command": "list",
            "entries": entries.len(),
        }));
    } else {
        // Plain addresses, one per line, pipe-friendly.
        for identity in &entries {
            println!("{identity}");
        }
    }

    Ok(())
}
