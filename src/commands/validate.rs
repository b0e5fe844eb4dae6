//! Validate command implementation
//!
//! Validates a single entry by its addressing string. A contributor fixing
//! a submission sees the complete list of findings in one pass.

use std::path::Path;

use anyhow::Result;

use grimoire_registry::output::{self, Icon};
use grimoire_registry::{validate_entry, PackageIdentity, RegistryConfig};

pub fn cmd_validate(root: &Path, entry: &str, strict_warnings: bool, json: bool) -> Result<()> {
    let config = RegistryConfig::load_or_default(root)?;
    let strict = strict_warnings || config.validation.strict_warnings;
    let color = output::use_color();

    let identity = PackageIdentity::from_entry_path(entry)?;

    if json {
        let _ = output::emit(serde_json::json!({
            "event": "start",
            "command": "validate",
            "entry": identity.to_string(),
        }));
    }

    let validated = match validate_entry(root, &identity, &config) {
        Ok(validated) => validated,
        Err(e) => {
            if json {
                let _ = output::emit(serde_json::json!({
                    "event": "complete",
                    "command": "validate",
                    "entry": identity.to_string(),
                    "fatal": e.to_string(),
                    "success": false,
                }));
            } else {
                println!("{} {}: {}", Icon::Error.colored(color), identity, e);
            }
            std::process::exit(1);
        }
    };

    let success =
        validated.errors() == 0 && (!strict || validated.warnings() == 0);

    if json {
        let violations: Vec<_> = validated
            .violations
            .iter()
            .map(super::violation_json)
            .collect();
        let _ = output::emit(serde_json::json!({
            "event": "complete",
            "command": "validate",
            "entry": identity.to_string(),
            "topics": validated.grimoire.topics.len(),
            "errors": validated.errors(),
            "warnings": validated.warnings(),
            "violations": violations,
            "success": success,
        }));
    } else {
        let icon = if validated.errors() > 0 {
            Icon::Error
        } else if validated.warnings() > 0 {
            Icon::Warning
        } else {
            Icon::Success
        };
        println!(
            "{} {} ({} topics)",
            icon.colored(color),
            identity,
            validated.grimoire.topics.len()
        );
        super::print_violations(&validated.violations, color);
        println!();
        println!(
            "Result: {} errors, {} warnings",
            validated.errors(),
            validated.warnings()
        );
    }

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
