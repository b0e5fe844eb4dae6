//! CLI command implementations

mod check;
mod list;
mod show;
mod validate;

pub use check::cmd_check;
pub use list::cmd_list;
pub use show::cmd_show;
pub use validate::cmd_validate;

use grimoire_registry::output::Icon;
use grimoire_registry::{Severity, Violation};

/// Stable machine-readable tag for a violation variant
fn violation_kind(violation: &Violation) -> &'static str {
    match violation {
        Violation::ManifestSchema { .. } => "manifest-schema",
        Violation::IdentityMismatch { .. } => "identity-mismatch",
        Violation::InsufficientTopics { .. } => "insufficient-topics",
        Violation::TopicFrontmatter { .. } => "topic-frontmatter",
        Violation::TopicSchema { .. } => "topic-schema",
        Violation::DuplicateSlug { .. } => "duplicate-slug",
        Violation::UnknownManifestField { .. } => "unknown-manifest-field",
        Violation::PathMismatch { .. } => "path-mismatch",
        Violation::UnknownCategory { .. } => "unknown-category",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

/// JSON payload for one violation
fn violation_json(violation: &Violation) -> serde_json::Value {
    serde_json::json!({
        "kind": violation_kind(violation),
        "severity": severity_label(violation.severity()),
        "message": violation.to_string(),
    })
}

/// One indented human-readable line per violation
fn print_violations(violations: &[Violation], color: bool) {
    for violation in violations {
        let icon = match violation.severity() {
            Severity::Warning => Icon::Warning,
            Severity::Error => Icon::Error,
        };
        println!("    {} {}", icon.colored(color), violation);
    }
}
