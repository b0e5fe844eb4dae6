//! Registry configuration
//!
//! An optional `registry.toml` at the registry root tunes validation
//! policy. Precedence: CLI flags, then `GRIMREG_*` environment variables,
//! then the config file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Config file name, looked up at the registry root
pub const CONFIG_FILE: &str = "registry.toml";

/// Validation policy
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Treat warning-severity violations as failures
    #[serde(default)]
    pub strict_warnings: bool,

    /// Closes the topic category vocabulary when non-empty
    #[serde(default)]
    pub allowed_categories: Vec<String>,
}

impl ValidationConfig {
    /// Whether the registry restricts topic categories to a fixed set
    pub fn closes_categories(&self) -> bool {
        !self.allowed_categories.is_empty()
    }

    pub fn allows_category(&self, category: &str) -> bool {
        !self.closes_categories() || self.allowed_categories.iter().any(|c| c == category)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

impl RegistryConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys)
    pub fn load_with_warnings(path: &Path) -> RegistryResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| RegistryError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from the registry root, or defaults when no config file exists
    ///
    /// A present-but-broken config file is an error: silently ignoring it
    /// would let CI run under the wrong policy.
    pub fn load_or_default(registry_root: &Path) -> RegistryResult<Self> {
        let path = registry_root.join(CONFIG_FILE);
        if path.is_file() {
            Ok(Self::load(&path)?.with_env_overrides())
        } else {
            Ok(Self::default().with_env_overrides())
        }
    }

    /// Apply environment variable overrides (GRIMREG_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("GRIMREG_STRICT_WARNINGS") {
            self.validation.strict_warnings = val.to_lowercase() != "false" && val != "0";
        }
        self
    }
}
