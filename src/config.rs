//! Configuration loading and merging.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shell::{Options, Profile, WHITESPACE};

/// Name of the profile used when neither the request nor the config names one.
pub const DEFAULT_PROFILE: &str = "linux";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("invalid profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: &'static str },
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Profile used when a request does not name one.
    pub default_profile: Option<String>,

    /// Custom profiles, keyed by name.
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// A custom tokenizer profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Separator characters.
    #[serde(default = "default_separators")]
    pub separators: String,
    /// Trim surrounding whitespace before tokenizing.
    #[serde(default)]
    pub trim: bool,
    /// Tokenizer options.
    #[serde(flatten)]
    pub options: Options,
}

fn default_separators() -> String {
    WHITESPACE.to_string()
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<String>,
    /// Redact secret-looking values before they are written.
    pub redact: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            redact: true,
        }
    }
}

/// Configuration with every profile resolved.
pub struct CompiledConfig {
    /// The raw config.
    pub raw: Config,
    /// Built-in and custom profiles by lower-case name.
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = user_config;
        }

        if let Some(cwd) = cwd
            && let Some(project_config) = Self::load_project_config(cwd)?
        {
            config.merge(project_config);
        }

        Ok(config)
    }

    fn load_user_config() -> Result<Option<Self>, ConfigError> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::read(&path).map(Some),
            _ => Ok(None),
        }
    }

    fn load_project_config(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        let path = cwd.join(".shelltoken.toml");
        if path.exists() {
            return Self::read(&path).map(Some);
        }
        Ok(None)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get user config path.
    /// Respects SHELLTOKEN_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SHELLTOKEN_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("shelltoken/config.toml"))
    }

    /// Merge another config into this one (other takes precedence).
    fn merge(&mut self, other: Config) {
        self.profiles.extend(other.profiles);

        if other.default_profile.is_some() {
            self.default_profile = other.default_profile;
        }
        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
        if !other.audit.redact {
            self.audit.redact = false;
        }
    }

    /// Resolve custom profiles next to the built-in ones.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let mut profiles = BTreeMap::new();
        profiles.insert("linux".to_string(), Profile::linux());
        profiles.insert("windows".to_string(), Profile::windows());

        for (name, custom) in &self.profiles {
            validate_separators(name, &custom.separators)?;
            let profile =
                Profile::new(custom.separators.clone(), custom.options).trimmed(custom.trim);
            profiles.insert(name.to_lowercase(), profile);
        }

        Ok(CompiledConfig {
            raw: self,
            profiles,
        })
    }
}

fn validate_separators(name: &str, separators: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidProfile {
        name: name.to_string(),
        reason,
    };
    if separators.is_empty() {
        return Err(invalid("separators must not be empty"));
    }
    if separators.contains(['"', '\'', '\\']) {
        return Err(invalid("quotes and backslash cannot be separators"));
    }
    Ok(())
}

impl CompiledConfig {
    /// Find a profile by name, falling back to the configured default.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.raw.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
            .to_lowercase();
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::UnknownProfile(name)),
        }
    }
}
