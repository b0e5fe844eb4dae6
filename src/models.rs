//! Core data models for the grimoire registry
//!
//! Defines the data structures shared across the crate:
//! - `GrimoireManifest`: decoded contents of a `grimoire.json`
//! - `TopicFrontmatter`: YAML metadata at the top of a topic document
//! - `Topic`: one parsed markdown document with frontmatter and body
//! - `Grimoire`: the validated aggregate for one registry entry

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::identity::PackageIdentity;

/// Origin of a registry entry's source repository
///
/// `github` is the only recognized value today; the field exists in the
/// manifest so other forges can be added without a format break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Github,
}

/// Default directory name for topic documents
pub const DEFAULT_TOPICS_DIR: &str = "topics";

fn default_topics_dir() -> String {
    DEFAULT_TOPICS_DIR.to_string()
}

/// Decoded contents of `grimoire.json`
///
/// `github` must match the `owner/repo` implied by the manifest's registry
/// location; the optional `path` describes where a monorepo sub-package
/// lives inside its source repository and is metadata only - the registry
/// directory structure is authoritative for addressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrimoireManifest {
    /// Display/lookup name (distinct from the repository name)
    pub name: String,

    /// One-line description of the package
    pub description: String,

    /// Semantic version of the grimoire content
    pub version: String,

    /// `owner/repo` slug of the source repository
    pub github: String,

    /// Sub-package location inside the source repository (monorepos only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Where the content was sourced from
    #[serde(rename = "sourceType", default)]
    pub source_type: SourceType,

    /// Directory holding the topic documents, relative to the entry
    #[serde(rename = "topicsDir", default = "default_topics_dir")]
    pub topics_dir: String,
}

/// YAML frontmatter extracted from a topic document
///
/// `title`, `slug`, `description`, `order` and `category` are required;
/// `tags` and `relatedFiles` default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFrontmatter {
    /// Human-readable topic title
    pub title: String,

    /// Addressing key, unique within a grimoire
    pub slug: String,

    /// One-line summary of the topic
    pub description: String,

    /// Sort key; ties are broken by slug, never by filesystem order
    pub order: i64,

    /// Open-vocabulary grouping label
    pub category: String,

    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Source files the topic documents, in presentation order
    #[serde(default, rename = "relatedFiles")]
    pub related_files: Vec<String>,
}

/// A parsed topic document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    /// Source document path relative to the entry directory
    pub file: PathBuf,

    /// Parsed frontmatter
    pub frontmatter: TopicFrontmatter,

    /// Raw markdown body after the frontmatter
    pub body: String,
}

impl Topic {
    pub fn new(
        file: impl Into<PathBuf>,
        frontmatter: TopicFrontmatter,
        body: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            frontmatter,
            body: body.into(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.frontmatter.slug
    }
}

/// One validated registry entry: manifest plus its ordered topic set
///
/// Constructed transiently per validation request and never mutated. Any
/// caching is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grimoire {
    pub identity: PackageIdentity,
    pub manifest: GrimoireManifest,
    pub topics: Vec<Topic>,
}

impl Grimoire {
    /// Build a grimoire, sorting topics by `(order ascending, slug ascending)`
    pub fn new(
        identity: PackageIdentity,
        manifest: GrimoireManifest,
        mut topics: Vec<Topic>,
    ) -> Self {
        topics.sort_by(|a, b| {
            a.frontmatter
                .order
                .cmp(&b.frontmatter.order)
                .then_with(|| a.frontmatter.slug.cmp(&b.frontmatter.slug))
        });
        Self {
            identity,
            manifest,
            topics,
        }
    }

    /// Look up a topic by slug
    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.slug() == slug)
    }
}
