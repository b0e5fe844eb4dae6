//! Show command implementation
//!
//! Displays one entry's manifest and its ordered topic set, the way the
//! consuming CLI would materialize it.

use std::path::Path;

use anyhow::Result;

use grimoire_registry::output::{self, Icon};
use grimoire_registry::{validate_entry, PackageIdentity, RegistryConfig};

pub fn cmd_show(root: &Path, entry: &str, json: bool) -> Result<()> {
    let config = RegistryConfig::load_or_default(root)?;
    let color = output::use_color();

    let identity = PackageIdentity::from_entry_path(entry)?;
    let validated = validate_entry(root, &identity, &config)?;
    let grimoire = &validated.grimoire;

    if json {
        let topics: Vec<_> = grimoire
            .topics
            .iter()
            .map(|t| {
                serde_json::json!({
                    "slug": t.frontmatter.slug,
                    "title": t.frontmatter.title,
                    "description": t.frontmatter.description,
                    "order": t.frontmatter.order,
                    "category": t.frontmatter.category,
                    "tags": t.frontmatter.tags,
                    "file": t.file.display().to_string(),
                })
            })
            .collect();
        let violations: Vec<_> = validated
            .violations
            .iter()
            .map(super::violation_json)
            .collect();
        let _ = output::emit(serde_json::json!({
            "event": "grimoire",
            "entry": identity.to_string(),
            "manifest": serde_json::to_value(&grimoire.manifest)?,
            "topics": topics,
            "violations": violations,
        }));
        return Ok(());
    }

    println!(
        "{} v{} ({})",
        grimoire.manifest.name, grimoire.manifest.version, identity
    );
    println!("{}", grimoire.manifest.description);
    println!("github: {}", grimoire.manifest.github);
    if let Some(path) = &grimoire.manifest.path {
        println!("path: {path}");
    }

    println!();
    println!("Topics ({}):", grimoire.topics.len());
    for topic in &grimoire.topics {
        println!(
            "  {:>4}  {:<28} {}",
            topic.frontmatter.order, topic.frontmatter.slug, topic.frontmatter.title
        );
    }

    if !validated.violations.is_empty() {
        println!();
        println!(
            "{} {} finding(s):",
            Icon::Warning.colored(color),
            validated.violations.len()
        );
        super::print_violations(&validated.violations, color);
    }

    Ok(())
}
