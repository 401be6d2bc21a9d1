//!
//! Handles application configuration: where the index lives, how many results
//! a query returns, which field is searched by default and which analyzer the
//! index was built with.
//! Configuration is typically loaded from a `config.toml` file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_RESULT_LIMIT, DEFAULT_WRITER_HEAP_BYTES, FIELD_CONTENTS};
use crate::engine::AnalyzerProfile;
use crate::error::NoteSearchError;

const APP_NAME: &str = "note-searcher";
const CONFIG_FILE_NAME: &str = "config.toml";
const INDEX_DIR_NAME: &str = "index";
/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "NOTE_SEARCHER_CONFIG_PATH";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Configuration specific to building the index.
pub struct IndexingConfig {
    /// File extensions (without the dot) that are indexed.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Memory budget in bytes for the index writer.
    #[serde(default = "default_writer_heap_bytes")]
    pub writer_heap_bytes: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            writer_heap_bytes: default_writer_heap_bytes(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_writer_heap_bytes() -> usize {
    DEFAULT_WRITER_HEAP_BYTES
}

/// Main application configuration structure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the index. Defaults to a platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,
    /// Maximum number of results returned per query.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    /// Field searched when a query term has no field qualifier.
    #[serde(default = "default_field")]
    pub default_field: String,
    /// Analyzer used for the default field. Must match the one the index was built with.
    #[serde(default)]
    pub analyzer: AnalyzerProfile,
    /// Rewrite `#tag` query terms to `tags:tag`.
    #[serde(default = "default_expand_tags")]
    pub expand_tags: bool,
    /// Indexing configuration settings.
    #[serde(default)]
    pub indexing: IndexingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_path: None,
            result_limit: default_result_limit(),
            default_field: default_field(),
            analyzer: AnalyzerProfile::default(),
            expand_tags: default_expand_tags(),
            indexing: IndexingConfig::default(),
        }
    }
}

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_field() -> String {
    FIELD_CONTENTS.to_string()
}

fn default_expand_tags() -> bool {
    true
}

impl AppConfig {
    /// Checks the invariants the query executor and indexer rely on.
    pub fn validate(&self) -> std::result::Result<(), NoteSearchError> {
        if self.result_limit == 0 {
            return Err(NoteSearchError::Configuration(
                "result_limit must be a positive integer".to_string(),
            ));
        }
        if self.default_field.trim().is_empty() {
            return Err(NoteSearchError::Configuration("default_field must not be empty".to_string()));
        }
        if self.indexing.extensions.is_empty() {
            return Err(NoteSearchError::Configuration(
                "indexing.extensions must list at least one extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the index directory: `index_path` if set, otherwise
    /// `<data_local_dir>/note-searcher/index`.
    pub fn index_location(&self) -> std::result::Result<PathBuf, NoteSearchError> {
        match &self.index_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => dirs::data_local_dir()
                .map(|base| base.join(APP_NAME).join(INDEX_DIR_NAME))
                .ok_or_else(|| {
                    NoteSearchError::Configuration("Could not determine user data directory".to_string())
                }),
        }
    }
}

/// Returns the default path to the configuration file.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not find config directory"))?
        .join(APP_NAME);
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Gets the configuration path: an explicit override first, then ENV, then
/// the default location.
pub fn get_config_path_or_default(override_path: Option<&PathBuf>) -> Result<PathBuf> {
    choose_config_path(override_path, std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
}

fn choose_config_path(override_path: Option<&PathBuf>, env_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        log::debug!("Using override config path: {}", path.display());
        return Ok(path.clone());
    }
    if let Some(env_path) = env_path {
        log::debug!("Using config path from ENV: {}", env_path.display());
        return Ok(env_path);
    }
    get_config_path()
}

/// Loads the application configuration from a specified path, ENV, or the default location.
///
/// If the configuration file does not exist at the target path, it is created
/// with default settings. Returns an error if the file exists but cannot be
/// read or parsed.
pub fn load_config(override_path: Option<&PathBuf>) -> Result<AppConfig> {
    let config_file_path = get_config_path_or_default(override_path)?;
    log::debug!("Attempting to load config from: {}", config_file_path.display());

    if !config_file_path.exists() {
        log::info!(
            "Config file not found at '{}'. Creating default.",
            config_file_path.display()
        );
        let default_config = AppConfig::default();
        save_config(&default_config, override_path)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_file_path)
        .with_context(|| format!("Failed to read config file at '{}'", config_file_path.display()))?;

    match toml::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            log::debug!("Parsed config successfully: {:?}", config);
            Ok(config)
        }
        Err(e) => {
            log::error!(
                "Failed to parse config file at '{}': {}. Ensure it is valid TOML.",
                config_file_path.display(),
                e
            );
            anyhow::bail!("Failed to parse configuration file: {}", e)
        }
    }
}

/// Saves the configuration to a specified path, ENV, or the default location,
/// creating the parent directory if needed. Returns the path written.
pub fn save_config(config: &AppConfig, override_path: Option<&PathBuf>) -> Result<PathBuf> {
    let config_file_path = get_config_path_or_default(override_path)?;
    let app_config_dir = config_file_path
        .parent()
        .ok_or_else(|| anyhow!("Invalid config file path provided or determined"))?;

    fs::create_dir_all(app_config_dir)
        .with_context(|| format!("Failed to create config directory: {}", app_config_dir.display()))?;

    let mut config_content = toml::to_string_pretty(config)
        .with_context(|| "Failed to serialize configuration to TOML")?;

    if config.index_path.is_none() {
        let hint = "# Directory holding the search index (defaults to the platform data directory)\n\
                    #index_path = \"/path/to/index\"\n\n";
        config_content = format!("{}{}", hint, config_content);
    }

    fs::write(&config_file_path, config_content)
        .with_context(|| format!("Failed to write config file to '{}'", config_file_path.display()))?;

    log::debug!("Configuration saved to '{}'", config_file_path.display());
    Ok(config_file_path)
}
