//! Grimoire registry - resolution and validation for curated content
//!
//! A grimoire registry is a directory tree of per-project grimoires (a
//! JSON manifest plus markdown topic documents) keyed by GitHub
//! `owner/repo`, with optional sub-paths for monorepo sub-packages. This
//! crate maps package identities to registry directories, validates the
//! manifest and topic set found there, and normalizes topics into an
//! ordered, addressable list. All operations are synchronous, read-only
//! functions of the filesystem contents at call time.

pub mod config;
pub mod error;
pub mod identity;
pub mod locator;
pub mod models;
pub mod output;
pub mod parser;
pub mod validator;

// Re-exports for convenience
pub use config::{RegistryConfig, ValidationConfig};
pub use error::{RegistryError, RegistryResult};
pub use identity::{PackageIdentity, RegistryEntryPath};
pub use locator::{entry_dir, enumerate, MANIFEST_FILE};
pub use models::{Grimoire, GrimoireManifest, SourceType, Topic, TopicFrontmatter};
pub use parser::{extract_frontmatter, parse_mapping, ExtractedFrontmatter, FrontmatterError};
pub use validator::{
    check_registry, validate_entry, RegistryReport, Severity, ValidatedEntry, Violation,
    MIN_TOPICS,
};
