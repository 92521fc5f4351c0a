//! Configuration loader that merges files and environment overrides.

use crate::error::{ConfigError, Result};
use config::{Environment, File};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a configuration document from files and environment variables.
///
/// Files are merged in the order they are added (later files override earlier ones);
/// environment overrides take precedence over every file.
///
/// # Examples
///
/// ```rust,no_run
/// use netif_validate::core::PlatformLoader;
/// use netif_validate::platform::BaremetalPlatform;
///
/// # fn example() -> netif_validate::error::Result<()> {
/// // NETIF_EXTERNAL_BRIDGE=br0 -> external_bridge = "br0"
/// let platform: BaremetalPlatform = PlatformLoader::new()
///     .with_file("config/platform.yaml")
///     .with_env_overrides("NETIF", "__")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlatformLoader {
    file_paths: Vec<PathBuf>,
    env_prefix: Option<String>,
    env_separator: Option<String>,
    env_vars: Option<HashMap<String, String>>,
}

impl PlatformLoader {
    /// Create a loader with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file source with automatic format detection.
    ///
    /// Supported formats: YAML (.yaml, .yml), TOML (.toml), JSON (.json)
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Add environment variable overrides.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "NETIF")
    /// * `separator` - Separator for nested keys (e.g., "__" for NETIF_INVENTORY__TIMEOUT_SECS)
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.env_separator = Some(separator.to_string());
        self
    }

    /// Read overrides from `vars` instead of the process environment.
    ///
    /// Only takes effect together with [`with_env_overrides`](Self::with_env_overrides).
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Load and merge every source, then deserialize into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources are configured
    /// - A file is missing or has an unsupported extension
    /// - Merging or deserialization fails
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.file_paths.is_empty() && self.env_prefix.is_none() {
            return Err(ConfigError::LoadError(
                "No configuration sources specified".to_string(),
            ));
        }

        let mut builder = config::Config::builder();

        for path in &self.file_paths {
            validate_extension(path)?;
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "adding configuration file");
            builder = builder.add_source(File::from(path.clone()).required(true));
        }

        if let (Some(prefix), Some(separator)) = (&self.env_prefix, &self.env_separator) {
            let env = Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator(separator)
                .try_parsing(true)
                .source(self.env_vars.clone());
            builder = builder.add_source(env);
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::LoadError(format!("Failed to build configuration: {}", e)))?;

        config.try_deserialize::<T>().map_err(|e| {
            ConfigError::DeserializationError(format!("Failed to deserialize configuration: {}", e))
        })
    }
}

/// Validate that the file extension is supported.
fn validate_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ConfigError::LoadError(format!(
                "Unable to determine file format for: {}",
                path.display()
            ))
        })?;

    match extension {
        "yaml" | "yml" | "toml" | "json" => Ok(()),
        _ => Err(ConfigError::LoadError(format!(
            "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
            extension
        ))),
    }
}
