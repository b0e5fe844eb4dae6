//! Package identity and registry addressing
//!
//! A [`PackageIdentity`] names one publishable unit by GitHub `owner/repo`
//! plus, for monorepo sub-packages, an ordered sequence of extra path
//! segments. Its canonical string form, [`RegistryEntryPath`], doubles as
//! the on-disk directory path and the CLI-visible addressing key
//! (e.g. `effect-ts/effect/sql`). The entry path is always derived, never
//! stored, so the two representations cannot drift.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{RegistryError, RegistryResult};

/// Identity of one registry entry
///
/// Construction is unchecked; segment constraints are enforced when the
/// identity is turned into an entry path. Two identities are equal iff
/// owner, repo, and the full ordered segment sequence match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageIdentity {
    /// GitHub owner (user or organization)
    pub owner: String,

    /// GitHub repository name
    pub repo: String,

    /// Sub-package path segments (empty for a repo-root entry)
    pub path: Vec<String>,
}

impl PackageIdentity {
    /// Identity for a repo-root entry
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: Vec::new(),
        }
    }

    /// Identity for a monorepo sub-package
    pub fn with_path<I, S>(owner: impl Into<String>, repo: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this identity addresses a monorepo sub-package
    pub fn is_subpackage(&self) -> bool {
        !self.path.is_empty()
    }

    /// The `owner/repo` pair without any sub-package suffix
    pub fn github_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Canonical entry path: `owner/repo[/segment]*`
    ///
    /// Fails with [`RegistryError::InvalidIdentity`] if any segment is
    /// empty, is `.`/`..`, or contains characters outside the GitHub slug
    /// alphabet. This is the only place segment constraints are enforced,
    /// so a hostile identity can never address a directory outside the
    /// registry root.
    pub fn entry_path(&self) -> RegistryResult<RegistryEntryPath> {
        validate_segment(&self.owner)?;
        validate_segment(&self.repo)?;
        for segment in &self.path {
            validate_segment(segment)?;
        }

        let mut joined = format!("{}/{}", self.owner, self.repo);
        for segment in &self.path {
            joined.push('/');
            joined.push_str(segment);
        }
        Ok(RegistryEntryPath(joined))
    }

    /// Left-inverse of [`entry_path`](Self::entry_path)
    ///
    /// Splits `owner/repo[/path...]` back into an identity. Fails with
    /// [`RegistryError::AmbiguousPath`] when the input has fewer than two
    /// segments, and with [`RegistryError::InvalidIdentity`] when a
    /// segment is malformed.
    pub fn from_entry_path(path: &str) -> RegistryResult<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < 2 {
            return Err(RegistryError::AmbiguousPath {
                path: path.to_string(),
            });
        }

        for segment in &segments {
            validate_segment(segment)?;
        }

        Ok(Self {
            owner: segments[0].to_string(),
            repo: segments[1].to_string(),
            path: segments[2..].iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        for segment in &self.path {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Canonical `owner/repo[/segment]*` addressing string
///
/// Produced by [`PackageIdentity::entry_path`]; the inner string is
/// guaranteed to consist of validated segments joined by `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RegistryEntryPath(String);

impl RegistryEntryPath {
    /// The addressing string, segments joined by `/`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative filesystem path below the registry root
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl fmt::Display for RegistryEntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_segment(segment: &str) -> RegistryResult<()> {
    let invalid = |reason: &str| RegistryError::InvalidIdentity {
        segment: segment.to_string(),
        reason: reason.to_string(),
    };

    if segment.is_empty() {
        return Err(invalid("segment is empty"));
    }
    if segment == "." || segment == ".." {
        return Err(invalid("path traversal is not allowed"));
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(invalid("path separators are not allowed"));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid(&format!(
            "character '{}' is outside the slug alphabet",
            bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_repo_root() {
        let identity = PackageIdentity::new("effect-ts", "effect");
        let path = identity.entry_path().unwrap();

        assert_eq!(path.as_str(), "effect-ts/effect");
    }

    #[test]
    fn test_entry_path_subpackage() {
        let identity = PackageIdentity::with_path("effect-ts", "effect", ["sql"]);
        let path = identity.entry_path().unwrap();

        assert_eq!(path.as_str(), "effect-ts/effect/sql");
        assert!(identity.is_subpackage());
    }

    #[test]
    fn test_entry_path_rejects_dot_dot() {
        let identity = PackageIdentity::with_path("owner", "repo", [".."]);
        let result = identity.entry_path();

        assert!(matches!(
            result,
            Err(RegistryError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_entry_path_rejects_dot() {
        let identity = PackageIdentity::new("owner", ".");
        assert!(matches!(
            identity.entry_path(),
            Err(RegistryError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_entry_path_rejects_separator() {
        let identity = PackageIdentity::new("owner/nested", "repo");
        let err = identity.entry_path().unwrap_err();

        assert!(err.to_string().contains("path separators"));
    }

    #[test]
    fn test_entry_path_rejects_empty_segment() {
        let identity = PackageIdentity::new("", "repo");
        assert!(matches!(
            identity.entry_path(),
            Err(RegistryError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_entry_path_rejects_non_slug_characters() {
        let identity = PackageIdentity::new("owner", "my repo");
        let err = identity.entry_path().unwrap_err();

        assert!(err.to_string().contains("slug alphabet"));
    }

    #[test]
    fn test_from_entry_path_round_trip() {
        let identity = PackageIdentity::with_path("effect-ts", "effect", ["sql"]);
        let path = identity.entry_path().unwrap();
        let parsed = PackageIdentity::from_entry_path(path.as_str()).unwrap();

        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_from_entry_path_single_segment_is_ambiguous() {
        let result = PackageIdentity::from_entry_path("effect-ts");

        assert!(matches!(result, Err(RegistryError::AmbiguousPath { .. })));
    }

    #[test]
    fn test_from_entry_path_empty_is_ambiguous() {
        let result = PackageIdentity::from_entry_path("");

        assert!(matches!(result, Err(RegistryError::AmbiguousPath { .. })));
    }

    #[test]
    fn test_from_entry_path_double_slash_is_invalid() {
        let result = PackageIdentity::from_entry_path("owner//repo");

        assert!(matches!(
            result,
            Err(RegistryError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_identities_differ_on_path_suffix() {
        let root = PackageIdentity::new("effect-ts", "effect");
        let sql = PackageIdentity::with_path("effect-ts", "effect", ["sql"]);

        assert_ne!(root, sql);
        assert_eq!(root.github_slug(), sql.github_slug());
    }

    #[test]
    fn test_display_matches_entry_path() {
        let identity = PackageIdentity::with_path("effect-ts", "effect", ["ai"]);

        assert_eq!(
            identity.to_string(),
            identity.entry_path().unwrap().as_str()
        );
    }

    #[test]
    fn test_entry_path_to_path_buf_splits_segments() {
        let identity = PackageIdentity::with_path("effect-ts", "effect", ["sql"]);
        let path = identity.entry_path().unwrap().to_path_buf();

        let segments: Vec<_> = path.iter().map(|s| s.to_string_lossy()).collect();
        assert_eq!(segments, ["effect-ts", "effect", "sql"]);
    }
}
