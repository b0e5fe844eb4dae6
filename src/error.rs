//! Error types for the registry core
//!
//! Uses `thiserror` for library errors. Fatal errors short-circuit the
//! single operation they occur in; accumulated findings live in
//! [`crate::validator::Violation`] instead, so one validation pass can
//! surface every problem with an entry.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Fatal errors for registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An identity segment cannot be used as a registry directory name
    #[error("invalid identity segment '{segment}': {reason}")]
    InvalidIdentity { segment: String, reason: String },

    /// A registry path cannot be split into owner/repo[/path...]
    #[error("ambiguous registry path '{path}' - expected at least 'owner/repo'")]
    AmbiguousPath { path: String },

    /// Entry directory has no grimoire.json
    #[error("no grimoire.json found in {dir}")]
    ManifestMissing { dir: PathBuf },

    /// grimoire.json is not well-formed JSON
    #[error("malformed grimoire.json in {file}: {message}")]
    ManifestParse { file: PathBuf, message: String },

    /// Registry root (or another required directory) does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// registry.toml could not be decoded
    #[error("invalid registry config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
