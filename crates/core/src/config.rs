//! Run configuration
//!
//! [`SweepConfig`] is built once per invocation and handed to the engine by
//! reference. [`Settings`] holds optional connection defaults loaded from
//! `config.toml` in the mpclean config directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::age::Cutoff;
use crate::error::{Error, Result};

/// Current settings file schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "MPCLEAN_CONFIG_DIR";

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

/// Default region when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Buckets covered by a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketScope {
    /// Every bucket returned by the service
    All,
    /// One named bucket
    Single(String),
}

impl BucketScope {
    /// An empty or missing name means all buckets
    pub fn from_option(bucket: Option<String>) -> Self {
        match bucket {
            Some(name) if !name.is_empty() => BucketScope::Single(name),
            _ => BucketScope::All,
        }
    }
}

/// Immutable configuration for a single sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    pub scope: BucketScope,
    pub cutoff: Cutoff,
    pub delete_requested: bool,
}

/// Static access credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through a variable lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let access_key = lookup(ACCESS_KEY_ENV).filter(|v| !v.is_empty());
        let secret_key = lookup(SECRET_KEY_ENV).filter(|v| !v.is_empty());

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Self {
                access_key,
                secret_key,
            }),
            _ => Err(Error::Config(format!(
                "Environment variables {ACCESS_KEY_ENV} and {SECRET_KEY_ENV} must be set"
            ))),
        }
    }
}

/// Optional connection defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Custom S3 endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Force path-style bucket addressing
    #[serde(default)]
    pub path_style: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            endpoint_url: None,
            region: None,
            path_style: false,
        }
    }
}

/// Loads the settings file
#[derive(Debug)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Create a SettingsManager for the default location
    ///
    /// `MPCLEAN_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("mpclean"),
        };
        Ok(Self {
            settings_path: config_dir.join("config.toml"),
        })
    }

    /// Create a SettingsManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk
    ///
    /// A missing file yields default settings.
    pub fn load(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.settings_path)?;
        let settings: Settings = toml::from_str(&content)?;

        if settings.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Settings file version {} is newer than supported version {}. Please upgrade mpclean.",
                settings.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn temp_settings_manager() -> (SettingsManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        (SettingsManager::with_path(path), temp_dir)
    }

    #[test]
    fn test_bucket_scope() {
        assert_eq!(BucketScope::from_option(None), BucketScope::All);
        assert_eq!(BucketScope::from_option(Some(String::new())), BucketScope::All);
        assert_eq!(
            BucketScope::from_option(Some("logs".into())),
            BucketScope::Single("logs".into())
        );
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ACCESS_KEY_ENV, "AKID"), (SECRET_KEY_ENV, "secret")]);
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.access_key, "AKID");
        assert_eq!(creds.secret_key, "secret");
        assert!(!format!("{creds:?}").contains("secret\""));
    }

    #[test]
    fn test_credentials_missing_or_empty() {
        let only_access: HashMap<&str, &str> = HashMap::from([(ACCESS_KEY_ENV, "AKID")]);
        let err = Credentials::from_lookup(|k| only_access.get(k).map(|v| v.to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let empty: HashMap<&str, &str> =
            HashMap::from([(ACCESS_KEY_ENV, "AKID"), (SECRET_KEY_ENV, "")]);
        assert!(Credentials::from_lookup(|k| empty.get(k).map(|v| v.to_string())).is_err());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_settings_manager();
        let settings = manager.load().unwrap();
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
        assert!(settings.endpoint_url.is_none());
        assert!(!settings.path_style);
    }

    #[test]
    fn test_load_settings_file() {
        let (manager, _temp_dir) = temp_settings_manager();
        std::fs::write(
            manager.settings_path(),
            r#"
            schema_version = 1
            endpoint_url = "https://s3.example.com"
            region = "cn-east-1"
            path_style = true
            "#,
        )
        .unwrap();

        let settings = manager.load().unwrap();
        assert_eq!(
            settings.endpoint_url.as_deref(),
            Some("https://s3.example.com")
        );
        assert_eq!(settings.region.as_deref(), Some("cn-east-1"));
        assert!(settings.path_style);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_settings_manager();
        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(manager.settings_path(), content).unwrap();

        let result = manager.load();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }
}
