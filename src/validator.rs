//! Entry validation
//!
//! Given a resolved registry directory, loads and checks the manifest and
//! topic set against the schema and cross-file invariants, producing a
//! normalized [`Grimoire`] plus every accumulated [`Violation`]. Only a
//! missing or syntactically broken `grimoire.json` is fatal; everything
//! else is collected so a single run reports everything wrong with an
//! entry instead of requiring repeated fix-and-rerun cycles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::identity::PackageIdentity;
use crate::locator::{self, MANIFEST_FILE};
use crate::models::{
    Grimoire, GrimoireManifest, SourceType, Topic, TopicFrontmatter, DEFAULT_TOPICS_DIR,
};
use crate::parser;

/// Hard minimum number of topic documents per entry
pub const MIN_TOPICS: usize = 5;

/// Severity of an accumulated violation
///
/// Errors always fail a check run; whether warnings do is caller policy
/// (`--strict-warnings` or `validation.strict_warnings`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One accumulated validation finding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// Required manifest field missing, mistyped, or malformed
    #[error("manifest field '{field}': {detail}")]
    ManifestSchema { field: String, detail: String },

    /// Manifest `github` disagrees with the entry's registry location
    #[error("manifest github '{manifest_github}' does not match registry location '{expected}'")]
    IdentityMismatch {
        manifest_github: String,
        expected: String,
    },

    /// Fewer topic files than the contribution minimum
    #[error("found {count} topic file(s), at least {minimum} required")]
    InsufficientTopics { count: usize, minimum: usize },

    /// Topic file frontmatter could not be read at all
    #[error("{file}: {message}")]
    TopicFrontmatter { file: PathBuf, message: String },

    /// Required topic frontmatter field missing or mistyped
    #[error("{file}: field '{field}': {detail}")]
    TopicSchema {
        file: PathBuf,
        field: String,
        detail: String,
    },

    /// Two or more topic files share a slug
    #[error("duplicate slug '{slug}' shared by: {}", format_files(.files))]
    DuplicateSlug { slug: String, files: Vec<PathBuf> },

    /// Manifest key outside the known schema
    #[error("unknown manifest field '{field}'")]
    UnknownManifestField { field: String },

    /// Manifest `path` metadata disagrees with the registry sub-path
    #[error("manifest path '{manifest_path}' does not mirror registry sub-path '{entry_subpath}'")]
    PathMismatch {
        manifest_path: String,
        entry_subpath: String,
    },

    /// Topic category outside the registry's closed vocabulary
    #[error("{file}: category '{category}' is not in the registry's allowed set")]
    UnknownCategory { file: PathBuf, category: String },
}

impl Violation {
    pub fn severity(&self) -> Severity {
        match self {
            Violation::UnknownManifestField { .. }
            | Violation::PathMismatch { .. }
            | Violation::UnknownCategory { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

fn format_files(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated entry: the grimoire plus everything wrong with it
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    pub grimoire: Grimoire,
    pub violations: Vec<Violation>,
}

impl ValidatedEntry {
    pub fn errors(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Error)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Warning)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate one entry
///
/// Fatal outcomes (`Err`): the identity cannot be mapped to a directory,
/// `grimoire.json` is missing, or it is not well-formed JSON. Everything
/// else is accumulated into the returned [`ValidatedEntry`].
pub fn validate_entry(
    registry_root: &Path,
    identity: &PackageIdentity,
    config: &RegistryConfig,
) -> RegistryResult<ValidatedEntry> {
    let dir = locator::entry_dir(registry_root, identity)?;

    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(RegistryError::ManifestMissing { dir });
    }

    let content = fs::read_to_string(&manifest_path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| RegistryError::ManifestParse {
            file: manifest_path.clone(),
            message: e.to_string(),
        })?;

    let mut violations = Vec::new();
    let manifest = decode_manifest(&value, &mut violations);

    check_identity(&manifest, identity, &mut violations);
    check_path_metadata(&manifest, identity, &mut violations);

    let topics = scan_topics(&dir, &manifest.topics_dir, config, &mut violations)?;

    Ok(ValidatedEntry {
        grimoire: Grimoire::new(identity.clone(), manifest, topics),
        violations,
    })
}

/// Fields a `grimoire.json` may carry
const KNOWN_MANIFEST_FIELDS: &[&str] = &[
    "name",
    "description",
    "version",
    "github",
    "path",
    "sourceType",
    "topicsDir",
];

/// Decode a parsed manifest value, accumulating one finding per defect
///
/// Always produces a manifest so the grimoire can still be constructed;
/// defective fields fall back to defaults and are reported.
fn decode_manifest(value: &serde_json::Value, violations: &mut Vec<Violation>) -> GrimoireManifest {
    let empty = serde_json::Map::new();
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            violations.push(Violation::ManifestSchema {
                field: "$".to_string(),
                detail: format!("manifest must be a JSON object, found {}", json_type_name(value)),
            });
            &empty
        }
    };

    for key in object.keys() {
        if !KNOWN_MANIFEST_FIELDS.contains(&key.as_str()) {
            violations.push(Violation::UnknownManifestField { field: key.clone() });
        }
    }

    let name = require_json_string(object, "name", violations);
    let description = require_json_string(object, "description", violations);
    let version = require_json_string(object, "version", violations);
    let github = require_json_string(object, "github", violations);
    let path = optional_json_string(object, "path", violations);
    let topics_dir = optional_json_string(object, "topicsDir", violations);

    if let Some(version) = &version {
        if let Err(e) = semver::Version::parse(version) {
            violations.push(Violation::ManifestSchema {
                field: "version".to_string(),
                detail: format!("not a semantic version: {}", e),
            });
        }
    }

    if let Some(github) = &github {
        if !is_github_slug(github) {
            violations.push(Violation::ManifestSchema {
                field: "github".to_string(),
                detail: format!("expected 'owner/repo', found '{}'", github),
            });
        }
    }

    let source_type = match require_json_string(object, "sourceType", violations) {
        Some(raw) if raw == "github" => SourceType::Github,
        Some(raw) => {
            violations.push(Violation::ManifestSchema {
                field: "sourceType".to_string(),
                detail: format!("unrecognized value '{}' - expected \"github\"", raw),
            });
            SourceType::Github
        }
        None => SourceType::Github,
    };

    let topics_dir = match topics_dir {
        Some(dir) if is_safe_dir_name(&dir) => dir,
        Some(dir) => {
            violations.push(Violation::ManifestSchema {
                field: "topicsDir".to_string(),
                detail: format!("'{}' is not a plain relative directory name", dir),
            });
            DEFAULT_TOPICS_DIR.to_string()
        }
        None => DEFAULT_TOPICS_DIR.to_string(),
    };

    GrimoireManifest {
        name: name.unwrap_or_default(),
        description: description.unwrap_or_default(),
        version: version.unwrap_or_default(),
        github: github.unwrap_or_default(),
        path,
        source_type,
        topics_dir,
    }
}

fn check_identity(
    manifest: &GrimoireManifest,
    identity: &PackageIdentity,
    violations: &mut Vec<Violation>,
) {
    // Structurally broken github values are already reported as schema
    // findings; the mismatch check only applies to well-formed slugs.
    if is_github_slug(&manifest.github) && manifest.github != identity.github_slug() {
        violations.push(Violation::IdentityMismatch {
            manifest_github: manifest.github.clone(),
            expected: identity.github_slug(),
        });
    }
}

/// The registry directory structure is authoritative for addressing;
/// manifest `path` is descriptive metadata. A sub-package whose metadata
/// does not mirror its registry sub-path gets a warning, never an error.
fn check_path_metadata(
    manifest: &GrimoireManifest,
    identity: &PackageIdentity,
    violations: &mut Vec<Violation>,
) {
    let manifest_path = match &manifest.path {
        Some(path) if identity.is_subpackage() => path,
        _ => return,
    };

    let manifest_segments: Vec<&str> = manifest_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let subpath: Vec<&str> = identity.path.iter().map(String::as_str).collect();

    if !manifest_segments.ends_with(&subpath) {
        violations.push(Violation::PathMismatch {
            manifest_path: manifest_path.clone(),
            entry_subpath: identity.path.join("/"),
        });
    }
}

fn scan_topics(
    entry_dir: &Path,
    topics_dir: &str,
    config: &RegistryConfig,
    violations: &mut Vec<Violation>,
) -> RegistryResult<Vec<Topic>> {
    let topics_path = entry_dir.join(topics_dir);
    let files = list_topic_files(&topics_path)?;

    if files.len() < MIN_TOPICS {
        violations.push(Violation::InsufficientTopics {
            count: files.len(),
            minimum: MIN_TOPICS,
        });
    }

    let mut topics = Vec::new();
    for file in &files {
        // Violations name the file relative to the entry directory.
        let name = file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        let label = Path::new(topics_dir).join(name);

        let content = fs::read_to_string(file)?;
        let extracted = match parser::extract_frontmatter(&content) {
            Ok(extracted) => extracted,
            Err(e) => {
                violations.push(Violation::TopicFrontmatter {
                    file: label,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let mapping = match parser::parse_mapping(&extracted.yaml) {
            Ok(mapping) => mapping,
            Err(e) => {
                violations.push(Violation::TopicFrontmatter {
                    file: label,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if let Some(frontmatter) = check_topic_fields(&mapping, &label, violations) {
            if !config.validation.allows_category(&frontmatter.category) {
                violations.push(Violation::UnknownCategory {
                    file: label.clone(),
                    category: frontmatter.category.clone(),
                });
            }
            topics.push(Topic::new(label, frontmatter, extracted.body));
        }
    }

    check_duplicate_slugs(&topics, violations);
    Ok(topics)
}

fn list_topic_files(topics_path: &Path) -> RegistryResult<Vec<PathBuf>> {
    if !topics_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(topics_path)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
            .unwrap_or(false);
        if markdown {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Check required and optional topic fields, one finding per defect
///
/// Returns the frontmatter only when every required field is usable; the
/// file is otherwise excluded from the topic set (but stays counted toward
/// the topic minimum, which is a file-count rule).
fn check_topic_fields(
    mapping: &serde_yaml_ng::Mapping,
    file: &Path,
    violations: &mut Vec<Violation>,
) -> Option<TopicFrontmatter> {
    let title = require_yaml_string(mapping, "title", file, violations);
    let slug = require_yaml_string(mapping, "slug", file, violations);
    let description = require_yaml_string(mapping, "description", file, violations);
    let order = require_yaml_integer(mapping, "order", file, violations);
    let category = require_yaml_string(mapping, "category", file, violations);
    let tags = optional_yaml_string_seq(mapping, "tags", file, violations);
    let related_files = optional_yaml_string_seq(mapping, "relatedFiles", file, violations);

    Some(TopicFrontmatter {
        title: title?,
        slug: slug?,
        description: description?,
        order: order?,
        category: category?,
        tags,
        related_files,
    })
}

fn check_duplicate_slugs(topics: &[Topic], violations: &mut Vec<Violation>) {
    let mut by_slug: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
    for topic in topics {
        by_slug
            .entry(topic.slug())
            .or_default()
            .push(topic.file.clone());
    }

    for (slug, files) in by_slug {
        if files.len() > 1 {
            violations.push(Violation::DuplicateSlug {
                slug: slug.to_string(),
                files,
            });
        }
    }
}

// === field helpers ===

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn require_json_string(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let schema = |detail: String| Violation::ManifestSchema {
        field: field.to_string(),
        detail,
    };

    match object.get(field) {
        None => {
            violations.push(schema("required field is missing".to_string()));
            None
        }
        Some(serde_json::Value::String(s)) if s.is_empty() => {
            violations.push(schema("must be a non-empty string".to_string()));
            None
        }
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(schema(format!(
                "expected a string, found {}",
                json_type_name(other)
            )));
            None
        }
    }
}

fn optional_json_string(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(field) {
        None => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(Violation::ManifestSchema {
                field: field.to_string(),
                detail: format!("expected a string, found {}", json_type_name(other)),
            });
            None
        }
    }
}

fn is_github_slug(value: &str) -> bool {
    match value.split_once('/') {
        Some((owner, repo)) => !owner.is_empty() && !repo.is_empty() && !repo.contains('/'),
        None => false,
    }
}

fn is_safe_dir_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

fn require_yaml_string(
    mapping: &serde_yaml_ng::Mapping,
    field: &str,
    file: &Path,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let schema = |detail: String| Violation::TopicSchema {
        file: file.to_path_buf(),
        field: field.to_string(),
        detail,
    };

    match mapping.get(field) {
        None => {
            violations.push(schema("required field is missing".to_string()));
            None
        }
        Some(serde_yaml_ng::Value::String(s)) if s.is_empty() => {
            violations.push(schema("must be a non-empty string".to_string()));
            None
        }
        Some(serde_yaml_ng::Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(schema(format!(
                "expected a string, found {}",
                parser::yaml_type_name(other)
            )));
            None
        }
    }
}

fn require_yaml_integer(
    mapping: &serde_yaml_ng::Mapping,
    field: &str,
    file: &Path,
    violations: &mut Vec<Violation>,
) -> Option<i64> {
    let schema = |detail: String| Violation::TopicSchema {
        file: file.to_path_buf(),
        field: field.to_string(),
        detail,
    };

    match mapping.get(field) {
        None => {
            violations.push(schema("required field is missing".to_string()));
            None
        }
        Some(serde_yaml_ng::Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None => {
                violations.push(schema("expected an integer".to_string()));
                None
            }
        },
        Some(other) => {
            violations.push(schema(format!(
                "expected an integer, found {}",
                parser::yaml_type_name(other)
            )));
            None
        }
    }
}

fn optional_yaml_string_seq(
    mapping: &serde_yaml_ng::Mapping,
    field: &str,
    file: &Path,
    violations: &mut Vec<Violation>,
) -> Vec<String> {
    let schema = |detail: String| Violation::TopicSchema {
        file: file.to_path_buf(),
        field: field.to_string(),
        detail,
    };

    match mapping.get(field) {
        None => Vec::new(),
        Some(serde_yaml_ng::Value::Sequence(seq)) => {
            let mut items = Vec::new();
            for item in seq {
                match item {
                    serde_yaml_ng::Value::String(s) => items.push(s.clone()),
                    other => {
                        violations.push(schema(format!(
                            "expected a sequence of strings, found {} inside it",
                            parser::yaml_type_name(other)
                        )));
                    }
                }
            }
            items
        }
        Some(other) => {
            violations.push(schema(format!(
                "expected a sequence of strings, found {}",
                parser::yaml_type_name(other)
            )));
            Vec::new()
        }
    }
}

// === whole-registry checks ===

/// Outcome of validating one enumerated entry
#[derive(Debug)]
pub enum EntryOutcome {
    Valid(ValidatedEntry),
    Fatal(RegistryError),
}

/// Per-entry slice of a registry-wide check
#[derive(Debug)]
pub struct EntryReport {
    pub identity: PackageIdentity,
    pub outcome: EntryOutcome,
}

impl EntryReport {
    pub fn errors(&self) -> usize {
        match &self.outcome {
            EntryOutcome::Valid(entry) => entry.errors(),
            EntryOutcome::Fatal(_) => 1,
        }
    }

    pub fn warnings(&self) -> usize {
        match &self.outcome {
            EntryOutcome::Valid(entry) => entry.warnings(),
            EntryOutcome::Fatal(_) => 0,
        }
    }
}

/// Registry-wide check results
#[derive(Debug, Default)]
pub struct RegistryReport {
    pub entries: Vec<EntryReport>,
}

impl RegistryReport {
    pub fn errors(&self) -> usize {
        self.entries.iter().map(|e| e.errors()).sum()
    }

    pub fn warnings(&self) -> usize {
        self.entries.iter().map(|e| e.warnings()).sum()
    }

    pub fn is_success(&self, strict_warnings: bool) -> bool {
        self.errors() == 0 && (!strict_warnings || self.warnings() == 0)
    }
}

/// Enumerate the registry and validate every discovered entry
pub fn check_registry(
    registry_root: &Path,
    config: &RegistryConfig,
) -> RegistryResult<RegistryReport> {
    let identities = locator::enumerate(registry_root)?;

    let entries = identities
        .into_iter()
        .map(|identity| {
            let outcome = match validate_entry(registry_root, &identity, config) {
                Ok(entry) => EntryOutcome::Valid(entry),
                Err(e) => EntryOutcome::Fatal(e),
            };
            EntryReport { identity, outcome }
        })
        .collect();

    Ok(RegistryReport { entries })
}
