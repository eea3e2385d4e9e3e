//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::form::{FormOptions, IdentityPolicy};

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Horizontal drag distance in pixels for one indent level
    pub indent_width: f64,
    /// Canonicalize organizations into depth-first order on load
    pub sort_by_dfs: bool,
    /// Drop unknown membership ids on load instead of failing
    pub ignore_missing_members: bool,
    /// How persisted ids are derived on submit
    pub identity: IdentityPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent_width: 50.0,
            sort_by_dfs: true,
            ignore_missing_members: true,
            identity: IdentityPolicy::Stable,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent_width: Option<f64>,
    pub sort_by_dfs: Option<bool>,
    pub ignore_missing_members: Option<bool>,
    pub identity: Option<IdentityPolicy>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_identity(value: &str) -> Result<IdentityPolicy, ApplicationError> {
    match value.to_ascii_lowercase().as_str() {
        "stable" => Ok(IdentityPolicy::Stable),
        "names" => Ok(IdentityPolicy::Names),
        other => Err(ApplicationError::Config {
            message: format!("unknown identity policy: {other} (expected stable or names)"),
        }),
    }
}

impl Settings {
    /// Load settings with full precedence.
    ///
    /// An explicit file must exist; the global file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Load settings from a single file on top of defaults, ignoring the
    /// global file and the environment.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let settings = Self::default().merge_with(&load_raw_settings(path)?);
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            sort_by_dfs: overlay.sort_by_dfs.unwrap_or(self.sort_by_dfs),
            ignore_missing_members: overlay
                .ignore_missing_members
                .unwrap_or(self.ignore_missing_members),
            identity: overlay.identity.unwrap_or(self.identity),
        }
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_float("indent_width") {
            settings.indent_width = val;
        }
        if let Ok(val) = config.get_bool("sort_by_dfs") {
            settings.sort_by_dfs = val;
        }
        if let Ok(val) = config.get_bool("ignore_missing_members") {
            settings.ignore_missing_members = val;
        }
        if let Ok(val) = config.get_string("identity") {
            settings.identity = parse_identity(&val)?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if !self.indent_width.is_finite() || self.indent_width <= 0.0 {
            return Err(ApplicationError::Config {
                message: format!("indent_width must be positive, got {}", self.indent_width),
            });
        }
        Ok(())
    }

    /// Mapper options derived from these settings.
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            sort_by_dfs: self.sort_by_dfs,
            ignore_missing_members: self.ignore_missing_members,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/orgtree/orgtree.toml
#   Explicit: --config <file>
#   Env:      ORGTREE_* environment variables (e.g. ORGTREE_INDENT_WIDTH=40)

# Horizontal drag distance in pixels for one indent level
# indent_width = 50.0

# Reorder organizations depth-first when loading a document
# sort_by_dfs = true

# Drop membership ids that have no member record instead of failing
# ignore_missing_members = true

# Persisted ids on submit: "stable" keeps identifiers, "names" uses display names
# identity = "stable"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
