//! # POS Configuration
//!
//! Where the store lives and where exported files go.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ./shop.db  --export-dir ./out  --utc-offset 480               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PANDESAL_DB_PATH, PANDESAL_EXPORT_DIR,                             │
//! │     PANDESAL_BACKUP_PREFIX, PANDESAL_UTC_OFFSET_MINUTES                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/pandesal-pos/pos.toml (Linux)                            │
//! │     ~/Library/Application Support/com.pandesal.pos/pos.toml (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     store in the data dir, exports in Downloads, local time            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pos.toml
//! [database]
//! path = "/var/lib/pandesal/pandesal.db"
//!
//! [export]
//! dir = "/home/baker/Exports"
//! backup_prefix = "pandehabibi"
//! utc_offset_minutes = 480  # omit to use the machine's local time
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use pandesal_core::{DisplayZone, DEFAULT_BACKUP_PREFIX};

/// File name of the store inside the data directory.
pub const DATABASE_FILE_NAME: &str = "pandesal.db";

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "pos.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Store file. Defaults to `pandesal.db` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[export]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Target directory for CSV exports and backups.
    /// Defaults to the user's Downloads folder.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_backup_prefix")]
    pub backup_prefix: String,

    /// Display zone for export dates, minutes east of UTC.
    /// `None` means the machine's local zone.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

fn default_backup_prefix() -> String {
    DEFAULT_BACKUP_PREFIX.to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            dir: None,
            backup_prefix: default_backup_prefix(),
            utc_offset_minutes: None,
        }
    }
}

// =============================================================================
// PosConfig
// =============================================================================

/// Complete configuration of the till.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl PosConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pos.toml)
    /// 3. Environment variables
    ///
    /// Command-line flags are applied by the caller, followed by
    /// [`validate`](Self::validate).
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading POS config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let prefix = self.export.backup_prefix.trim();
        if prefix.is_empty() {
            return Err(ConfigError::Invalid("backup_prefix must not be empty".into()));
        }
        if prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "backup_prefix must be a plain file name prefix, got: {}",
                prefix
            )));
        }

        if let Some(minutes) = self.export.utc_offset_minutes {
            if DisplayZone::from_offset_minutes(minutes).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "utc_offset_minutes must be within ±1439, got: {}",
                    minutes
                )));
            }
        }

        Ok(())
    }

    /// Applies `PANDESAL_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PANDESAL_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("PANDESAL_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.dir = Some(PathBuf::from(dir));
        }

        if let Some(prefix) = lookup("PANDESAL_BACKUP_PREFIX") {
            self.export.backup_prefix = prefix;
        }

        if let Some(offset) = lookup("PANDESAL_UTC_OFFSET_MINUTES") {
            match offset.trim().parse::<i32>() {
                Ok(minutes) => self.export.utc_offset_minutes = Some(minutes),
                Err(_) => warn!(offset = %offset, "Ignoring unparseable UTC offset in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Resolved Values
    // =========================================================================

    /// Store file, falling back to the platform data directory.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Export directory, falling back to Downloads, then the working directory.
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export.dir {
            return dir.clone();
        }

        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Zone in which exported sale dates are shown.
    pub fn display_zone(&self) -> DisplayZone {
        self.export
            .utc_offset_minutes
            .and_then(DisplayZone::from_offset_minutes)
            .unwrap_or_default()
    }

    pub fn backup_prefix(&self) -> &str {
        self.export.backup_prefix.trim()
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "pandesal", "pos")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PosConfig::default();
        assert_eq!(config.database.path, None);
        assert_eq!(config.backup_prefix(), "pandehabibi");
        assert_eq!(config.display_zone(), DisplayZone::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PosConfig = toml::from_str(
            r#"
            [export]
            utc_offset_minutes = 480
            "#,
        )
        .unwrap();

        assert_eq!(config.export.backup_prefix, "pandehabibi");
        assert_eq!(
            config.display_zone(),
            DisplayZone::from_offset_minutes(480).unwrap()
        );
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pos.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"/srv/shop.db\"\n\n[export]\nbackup_prefix = \"bakery\"\n",
        )
        .unwrap();

        let config = PosConfig::from_file(&path).unwrap();

        assert_eq!(config.database_path().unwrap(), PathBuf::from("/srv/shop.db"));
        assert_eq!(config.backup_prefix(), "bakery");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PANDESAL_EXPORT_DIR", "/tmp/out"),
            ("PANDESAL_UTC_OFFSET_MINUTES", "-300"),
            ("PANDESAL_BACKUP_PREFIX", "night-shift"),
        ]);
        let mut config = PosConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.export_dir(), PathBuf::from("/tmp/out"));
        assert_eq!(config.export.utc_offset_minutes, Some(-300));
        assert_eq!(config.backup_prefix(), "night-shift");
        assert_eq!(config.database.path, None);
    }

    #[test]
    fn test_bad_offset_override_is_ignored() {
        let mut config = PosConfig::default();
        config.apply_overrides(|key| {
            (key == "PANDESAL_UTC_OFFSET_MINUTES").then(|| "eight hours".to_string())
        });
        assert_eq!(config.export.utc_offset_minutes, None);
    }

    #[test]
    fn test_validation() {
        let mut config = PosConfig::default();

        config.export.backup_prefix = "  ".to_string();
        assert!(config.validate().is_err());

        config.export.backup_prefix = "../escape".to_string();
        assert!(config.validate().is_err());

        config.export.backup_prefix = "pandehabibi".to_string();
        config.export.utc_offset_minutes = Some(24 * 60);
        assert!(config.validate().is_err());

        config.export.utc_offset_minutes = Some(-12 * 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = PosConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[export]"));
        assert_eq!(toml::from_str::<PosConfig>(&toml_str).unwrap(), config);
    }
}
