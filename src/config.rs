//! Configuration module for the cross-reference resolver.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOXREF_` and use double
//! underscores to separate nested levels:
//! - `DOXREF_RESOLVER__PRIMARY_NAMESPACE=cinder` sets `resolver.primary_namespace`
//! - `DOXREF_RESOLVER__SHORT_ALIAS=ci` sets `resolver.short_alias`
//! - `DOXREF_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::SCOPE_SEPARATOR;

const CONFIG_DIR: &str = ".doxref";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "DOXREF_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Naming rules consumed by the index builder and resolver
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Naming rules for building the index and resolving references.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResolverConfig {
    /// The project's main namespace, often elided by reference authors
    #[serde(default = "default_primary_namespace")]
    pub primary_namespace: String,

    /// Short prefix rewritten to the primary namespace (`ci::Foo` -> `cinder::Foo`)
    #[serde(default = "default_short_alias")]
    pub short_alias: String,

    /// Classes whose qualified name contains any of these are skipped
    #[serde(default = "default_class_blacklist")]
    pub class_blacklist_substrings: Vec<String>,

    /// Namespaces starting with any of these are skipped along with their members
    #[serde(default = "default_namespace_blacklist")]
    pub namespace_blacklist_prefixes: Vec<String>,

    /// Namespaces listed by `SymbolIndex::whitelisted_namespaces`
    #[serde(default = "default_namespace_whitelist")]
    pub namespace_whitelist_prefixes: Vec<String>,

    /// Owner used for function references without a resolvable owner
    #[serde(default = "default_owner_namespace")]
    pub default_owner_namespace: String,

    /// Second owner tried when the default owner has no match
    #[serde(default = "default_secondary_owner_namespace")]
    pub secondary_default_owner_namespace: String,

    /// Scope given to functions and typedefs declared inside groups
    #[serde(default = "default_group_namespace")]
    pub group_namespace: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all modules (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `doxref::resolve = "trace"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_primary_namespace() -> String {
    "cinder".to_string()
}
fn default_short_alias() -> String {
    "ci".to_string()
}
fn default_class_blacklist() -> Vec<String> {
    vec!["glm".to_string(), "@".to_string()]
}
fn default_namespace_blacklist() -> Vec<String> {
    [
        "cinder::signals::detail",
        "cinder::audio::dsp::ooura",
        "cinder::detail",
        "glm::detail",
        "glm::gtc",
        "glm::gtx",
        "glm::io",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_namespace_whitelist() -> Vec<String> {
    vec!["cinder".to_string(), "glm".to_string()]
}
fn default_owner_namespace() -> String {
    "cinder".to_string()
}
fn default_secondary_owner_namespace() -> String {
    "cinder::app".to_string()
}
fn default_group_namespace() -> String {
    "glm".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            resolver: ResolverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            primary_namespace: default_primary_namespace(),
            short_alias: default_short_alias(),
            class_blacklist_substrings: default_class_blacklist(),
            namespace_blacklist_prefixes: default_namespace_blacklist(),
            namespace_whitelist_prefixes: default_namespace_whitelist(),
            default_owner_namespace: default_owner_namespace(),
            secondary_default_owner_namespace: default_secondary_owner_namespace(),
            group_namespace: default_group_namespace(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Rewrite a leading `short_alias::` to `primary_namespace::`.
    pub fn normalize<'a>(&self, name: &'a str) -> std::borrow::Cow<'a, str> {
        if !self.short_alias.is_empty() {
            if let Some(rest) = name
                .strip_prefix(self.short_alias.as_str())
                .and_then(|rest| rest.strip_prefix(SCOPE_SEPARATOR))
            {
                return format!("{}{SCOPE_SEPARATOR}{rest}", self.primary_namespace).into();
            }
        }
        name.into()
    }

    /// `primary_namespace::name`, or `None` when no primary namespace is set.
    pub fn in_primary(&self, name: &str) -> Option<String> {
        (!self.primary_namespace.is_empty())
            .then(|| format!("{}{SCOPE_SEPARATOR}{name}", self.primary_namespace))
    }

    pub fn is_class_blacklisted(&self, qualified_name: &str) -> bool {
        self.class_blacklist_substrings
            .iter()
            .any(|needle| !needle.is_empty() && qualified_name.contains(needle.as_str()))
    }

    pub fn is_namespace_blacklisted(&self, name: &str) -> bool {
        self.namespace_blacklist_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }

    pub fn is_namespace_whitelisted(&self, name: &str) -> bool {
        self.namespace_whitelist_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscore stays
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Find `.doxref/settings.toml` searching from the current directory up
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.resolver.primary_namespace, "cinder");
        assert_eq!(settings.resolver.short_alias, "ci");
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn test_normalize_short_alias() {
        let config = ResolverConfig::default();
        assert_eq!(config.normalize("ci::Foo"), "cinder::Foo");
        assert_eq!(config.normalize("ci::gl::Texture"), "cinder::gl::Texture");
        // Only a whole leading segment counts
        assert_eq!(config.normalize("circle::Foo"), "circle::Foo");
        assert_eq!(config.normalize("Foo"), "Foo");
        assert_eq!(config.normalize("app::ci::Foo"), "app::ci::Foo");
    }

    #[test]
    fn test_blacklists() {
        let config = ResolverConfig::default();
        assert!(config.is_class_blacklisted("glm::tvec3"));
        assert!(config.is_class_blacklisted("cinder::@0"));
        assert!(!config.is_class_blacklisted("cinder::gl::Texture"));
        assert!(config.is_namespace_blacklisted("cinder::detail::impl"));
        assert!(!config.is_namespace_blacklisted("cinder::app"));
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[resolver]
primary_namespace = "ofx"
short_alias = "of"
class_blacklist_substrings = ["detail"]

[logging]
default = "debug"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.resolver.primary_namespace, "ofx");
        assert_eq!(settings.resolver.short_alias, "of");
        assert_eq!(settings.resolver.class_blacklist_substrings, vec!["detail"]);
        // Unspecified fields keep their defaults
        assert_eq!(settings.resolver.secondary_default_owner_namespace, "cinder::app");
        assert_eq!(settings.logging.default, "debug");
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.resolver.group_namespace = "math".to_string();
        settings
            .logging
            .modules
            .insert("doxref::resolve".to_string(), "trace".to_string());

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.resolver.group_namespace, "math");
        assert_eq!(loaded.logging.modules["doxref::resolve"], "trace");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.resolver, ResolverConfig::default());
    }
}
