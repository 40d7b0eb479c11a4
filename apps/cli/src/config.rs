//! Configuration resolution for the CLI.
//!
//! Resolves config.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `{cwd}/.vramfit/config.toml` (workspace config)
//! 3. `~/.config/vramfit/config.toml` (global default)
//!
//! A missing file means defaults: the built-in catalog, catalog-order
//! tie-break and an empty device profile.

use anyhow::{Context, Result};
use registry::{DeviceProfile, Registry, TieBreak};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

/// Workspace config path, relative to the current directory.
pub const WORKSPACE_CONFIG: &str = ".vramfit/config.toml";

/// Default config written by `vramfit config init`.
pub const DEFAULT_CONFIG: &str = r#"# Custom catalog replacing the built-in one.
# catalog = "catalog.toml"

# "catalog-order" or "minimize-vram".
tie_break = "catalog-order"

# Defaults for `vramfit select`; flags override them.
[device]
available_vram_mb = 4096.0
supported_features = ["shader-f16"]
prefer_low_resource = false
"#;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog file to use instead of the built-in catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Default-pick tie-break.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Default device profile.
    #[serde(default)]
    pub device: DeviceProfile,
}

impl Config {
    /// Parse a TOML string into a `Config`.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a file path.
    ///
    /// A relative `catalog` path is resolved against the config's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config =
            Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))?;
        if let (Some(catalog), Some(parent)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = parent.join(&*catalog);
            }
        }
        Ok(config)
    }

    /// The catalog this config selects: a custom file or the built-in one.
    pub fn registry(&self) -> Result<Cow<'static, Registry>> {
        match &self.catalog {
            Some(path) => {
                let registry = Registry::load(path)
                    .with_context(|| format!("failed to load catalog from {}", path.display()))?;
                tracing::debug!(path = %path.display(), models = registry.len(), "loaded catalog");
                Ok(Cow::Owned(registry))
            }
            None => Ok(Cow::Borrowed(Registry::builtin())),
        }
    }
}

/// Path of the config file that applies, if any exists.
///
/// An explicit flag is returned even when the file is missing so that
/// loading reports the error.
pub fn resolve_config_path(config_flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_flag {
        return Some(path.to_path_buf());
    }

    let workspace_path = PathBuf::from(WORKSPACE_CONFIG);
    if workspace_path.exists() {
        return Some(workspace_path);
    }

    let global_path = global_config_path();
    global_path.exists().then_some(global_path)
}

/// Resolve config following the priority chain.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<Config> {
    match resolve_config_path(config_flag) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config");
            Config::load(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("vramfit")
        .join("config.toml")
}

/// Write the default config to `path`. Refuses to overwrite unless `force`.
pub fn generate_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))?;
    Ok(())
}
