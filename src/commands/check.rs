//! Check command implementation
//!
//! Validates every entry in the registry. CI entry point: exits non-zero
//! on any fatal or error-severity finding (warnings too in strict mode).

use std::path::Path;

use anyhow::Result;

use grimoire_registry::output::{self, Icon};
use grimoire_registry::validator::EntryOutcome;
use grimoire_registry::{check_registry, RegistryConfig};

pub fn cmd_check(root: &Path, strict_warnings: bool, json: bool) -> Result<()> {
    let config = RegistryConfig::load_or_default(root)?;
    let strict = strict_warnings || config.validation.strict_warnings;
    let color = output::use_color();

    if json {
        let _ = output::emit(serde_json::json!({
            "event": "start",
            "command": "check",
            "root": root.display().to_string(),
            "strict_warnings": strict,
        }));
    } else {
        println!("Grimoire Registry Check");
        println!("Root: {}", root.display());
        if strict {
            println!("Strict: failing on warnings");
        }
        println!();
    }

    let report = check_registry(root, &config)?;

    for entry in &report.entries {
        match &entry.outcome {
            EntryOutcome::Valid(validated) => {
                if json {
                    let violations: Vec<_> = validated
                        .violations
                        .iter()
                        .map(super::violation_json)
                        .collect();
                    let _ = output::emit(serde_json::json!({
                        "event": "entry",
                        "entry": entry.identity.to_string(),
                        "topics": validated.grimoire.topics.len(),
                        "errors": validated.errors(),
                        "warnings": validated.warnings(),
                        "violations": violations,
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
                        entry.identity,
                        validated.grimoire.topics.len()
                    );
                    super::print_violations(&validated.violations, color);
                }
            }
            EntryOutcome::Fatal(e) => {
                if json {
                    let _ = output::emit(serde_json::json!({
                        "event": "entry",
                        "entry": entry.identity.to_string(),
                        "fatal": e.to_string(),
                        "errors": 1,
                        "warnings": 0,
                    }));
                } else {
                    println!("{} {}: {}", Icon::Error.colored(color), entry.identity, e);
                }
            }
        }
    }

    let success = report.is_success(strict);

    if json {
        let _ = output::emit(serde_json::json!({
            "event": "complete",
            "command": "check",
            "entries": report.entries.len(),
            "errors": report.errors(),
            "warnings": report.warnings(),
            "success": success,
        }));
    } else {
        println!();
        println!(
            "Result: {} entries, {} errors, {} warnings",
            report.entries.len(),
            report.errors(),
            report.warnings()
        );
        if success {
            println!("{} Registry check PASSED", Icon::Success.colored(color));
        } else {
            println!("{} Registry check FAILED", Icon::Error.colored(color));
        }
    }

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
