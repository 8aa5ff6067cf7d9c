use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::archive::transfer::DEFAULT_LOCAL_DATA_DIR;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
    pub transfer: TransferConfig,
    pub stats: StatsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// File name suffixes treated as archives
    pub archive_suffixes: Vec<String>,
    /// Archives need local access to the payload; without it they are refused
    pub archives_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Where the local bot API server's files are visible to this process
    pub local_data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Whether a statistics reset also empties the ignore list
    pub reset_clears_ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from("file_statistics.db"),
                busy_timeout_ms: 5000,
            },
            ingest: IngestConfig {
                archive_suffixes: vec![".zip".to_string()],
                archives_enabled: true,
            },
            transfer: TransferConfig {
                local_data_dir: PathBuf::from(DEFAULT_LOCAL_DATA_DIR),
            },
            stats: StatsConfig {
                reset_clears_ignored: true,
            },
            logging: LoggingConfig { debug: false },
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`AppConfig::load`], reading `config_file` instead of `./config.toml`
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            // Start with default values
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().into_owned(),
            )?
            .set_default("database.busy_timeout_ms", defaults.database.busy_timeout_ms)?
            .set_default("ingest.archive_suffixes", defaults.ingest.archive_suffixes)?
            .set_default("ingest.archives_enabled", defaults.ingest.archives_enabled)?
            .set_default(
                "transfer.local_data_dir",
                defaults.transfer.local_data_dir.to_string_lossy().into_owned(),
            )?
            .set_default(
                "stats.reset_clears_ignored",
                defaults.stats.reset_clears_ignored,
            )?
            .set_default("logging.debug", defaults.logging.debug)?
            .add_source(file_source)
            // FILESTATS_DATABASE__PATH, FILESTATS_INGEST__ARCHIVE_SUFFIXES=.zip,.tgz, ...
            .add_source(
                config::Environment::with_prefix("FILESTATS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ingest.archive_suffixes")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Variable names understood by earlier deployments
        if let Ok(db_path) = env::var("DATABASE_FILE") {
            if !db_path.trim().is_empty() {
                app_config.database.path = PathBuf::from(db_path);
            }
        }
        if let Ok(debug) = env::var("DEBUG_MODE") {
            app_config.logging.debug = debug.eq_ignore_ascii_case("true");
        }

        if app_config.ingest.archive_suffixes.is_empty() && app_config.ingest.archives_enabled {
            return Err(ConfigError::Message(
                "ingest.archive_suffixes is empty while archives are enabled".to_string(),
            ));
        }

        Ok(app_config)
    }
}
