//! Registry enumeration and directory resolution
//!
//! Maps identities to directories below the registry root and discovers
//! every entry the registry contains. A directory is an entry iff it
//! directly contains a `grimoire.json`; directory depth alone does not
//! distinguish a repo-root grimoire from a monorepo sub-package, and
//! ancestors that merely contain entries are not entries themselves.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, RegistryResult};
use crate::identity::PackageIdentity;

/// Manifest file name that marks a directory as a registry entry
pub const MANIFEST_FILE: &str = "grimoire.json";

/// Resolve the on-disk directory for an identity
pub fn entry_dir(registry_root: &Path, identity: &PackageIdentity) -> RegistryResult<PathBuf> {
    Ok(registry_root.join(identity.entry_path()?.to_path_buf()))
}

/// Discover every entry below the registry root
///
/// Walks owner then repo directories, then recurses into descendant
/// directories looking for `grimoire.json`. The walk continues below an
/// entry so nested sub-packages (e.g. `effect-ts/effect/sql` under
/// `effect-ts/effect`) are discovered as independent entries. Hidden
/// directories are skipped. The result is sorted; re-running re-walks the
/// filesystem, there is no cached cursor.
pub fn enumerate(registry_root: &Path) -> RegistryResult<Vec<PackageIdentity>> {
    if !registry_root.is_dir() {
        return Err(RegistryError::DirectoryNotFound {
            path: registry_root.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for owner_dir in subdirectories(registry_root)? {
        for repo_dir in subdirectories(&owner_dir)? {
            collect_entries(registry_root, &repo_dir, &mut entries)?;
        }
    }

    entries.sort();
    Ok(entries)
}

/// Whether a directory directly contains a manifest
pub fn is_entry(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

fn collect_entries(
    registry_root: &Path,
    current: &Path,
    entries: &mut Vec<PackageIdentity>,
) -> RegistryResult<()> {
    if is_entry(current) {
        entries.push(identity_for(registry_root, current)?);
    }

    for dir in subdirectories(current)? {
        collect_entries(registry_root, &dir, entries)?;
    }

    Ok(())
}

fn identity_for(registry_root: &Path, dir: &Path) -> RegistryResult<PackageIdentity> {
    // strip_prefix cannot fail: every walked directory is below the root.
    let relative = dir.strip_prefix(registry_root).unwrap_or(dir);

    let mut segments = Vec::new();
    for component in relative.components() {
        let segment = component.as_os_str().to_str().ok_or_else(|| {
            RegistryError::InvalidIdentity {
                segment: component.as_os_str().to_string_lossy().into_owned(),
                reason: "directory name is not valid UTF-8".to_string(),
            }
        })?;
        segments.push(segment);
    }

    PackageIdentity::from_entry_path(&segments.join("/"))
}

fn subdirectories(dir: &Path) -> RegistryResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // Skip hidden directories
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false);
        if !hidden {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
