// Configuration loading and parsing (config/draft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::draft::setup::StartOptions;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// The assembled configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub draft: DraftConfig,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the participants and catalogs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A CSV sheet: participants in column 0, one column per category.
    File,
    /// The built-in conference catalog plus `participants`.
    Preset,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftConfig {
    pub source: SourceKind,
    /// CSV path, required for `source = "file"`.
    #[serde(default)]
    pub input_path: Option<String>,
    /// Participant names, required for `source = "preset"`.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Category drafted first; the others are shuffled. For the preset this
    /// defaults to the preset's pinned conference.
    #[serde(default)]
    pub pin_first_category: Option<String>,
}

impl DraftConfig {
    /// Start options derived from this config.
    pub fn start_options(&self) -> StartOptions {
        match (&self.pin_first_category, self.source) {
            (Some(name), _) => StartOptions::pinned(name.clone()),
            (None, SourceKind::Preset) => crate::preset::start_options(),
            (None, SourceKind::File) => StartOptions::default(),
        }
    }
}

/// Display and export names for categories and items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Labels {
    pub category: String,
    pub item: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            category: "Conference".into(),
            item: "Team".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            dir: "exports".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: String,
    /// Default `EnvFilter` directive; `RUST_LOG` overrides it.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: "logs".into(),
            filter: "confdraft=info,confdraft_core=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draft.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("draft.toml");
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: path.clone(),
            source,
        },
        other => other,
    })?;
    Ok(config)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from("<inline>"),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Install `config/draft.toml` (and any other default) from `defaults/` on
/// first run. Returns the files that were installed.
///
/// `.example` files are templates for the operator and are never installed.
/// An existing config file is left alone.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(copy_error(format!(
            "no defaults/ or config/ in {}; run confdraft from the workspace root",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut installed = Vec::new();
    for source in default_files(&defaults_dir)? {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);
        if install_default(&source, &target)? {
            info!("Installed default config {}", target.display());
            installed.push(target);
        }
    }
    Ok(installed)
}

/// Installable files in `defaults/`, sorted by name.
fn default_files(defaults_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = std::fs::read_dir(defaults_dir)
        .map_err(|e| copy_error(format!("cannot list {}: {e}", defaults_dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| copy_error(format!("cannot list {}: {e}", defaults_dir.display())))?
            .path();
        let is_template = path.extension().is_some_and(|ext| ext == "example");
        if path.is_file() && !is_template {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `source` to `target` unless `target` exists. The existence check and
/// the create are one step (`create_new`), so a concurrent edit is never
/// clobbered.
fn install_default(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error(format!("cannot create {}: {e}", target.display()))),
    };
    let mut src = std::fs::File::open(source)
        .map_err(|e| copy_error(format!("cannot read {}: {e}", source.display())))?;
    std::io::copy(&mut src, &mut dest)
        .map_err(|e| copy_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let draft = &config.draft;
    match draft.source {
        SourceKind::File => {
            if draft.input_path.as_deref().map_or(true, |p| p.trim().is_empty()) {
                return Err(invalid("draft.input_path", "required when source = \"file\""));
            }
        }
        SourceKind::Preset => {
            if draft.participants.iter().all(|p| p.trim().is_empty()) {
                return Err(invalid(
                    "draft.participants",
                    "at least one name is required when source = \"preset\"",
                ));
            }
        }
    }

    if draft
        .pin_first_category
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(invalid("draft.pin_first_category", "must not be empty"));
    }

    let text_fields: &[(&str, &str)] = &[
        ("labels.category", config.labels.category.as_str()),
        ("labels.item", config.labels.item.as_str()),
        ("export.dir", config.export.dir.as_str()),
        ("logging.dir", config.logging.dir.as_str()),
        ("logging.filter", config.logging.filter.as_str()),
    ];
    for (name, value) in text_fields {
        if value.trim().is_empty() {
            return Err(invalid(name, "must not be empty"));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
