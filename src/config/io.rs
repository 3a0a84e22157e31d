use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::{API_BASE_ENV, ConfigError, PanelSettings};

/// Default filename used to store the panel configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, writing defaults on first launch.
///
/// `LIFEPANEL_API_BASE` replaces the stored base URL for this run only, and
/// the resulting URL is validated before returning.
pub fn load_or_default() -> Result<PanelSettings, ConfigError> {
    let path = config_path()?;
    let mut settings = if path.exists() {
        load_settings_from(&path)?
    } else {
        let defaults = PanelSettings::default();
        save_to_path(&defaults, &path)?;
        tracing::info!("Wrote default configuration to {}", path.display());
        defaults
    };
    apply_env_override(&mut settings, std::env::var(API_BASE_ENV).ok());
    settings.api.parsed_base_url()?;
    Ok(settings)
}

/// Parse settings from a TOML file; a missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<PanelSettings, ConfigError> {
    if !path.exists() {
        return Ok(PanelSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration to the default location.
pub fn save(settings: &PanelSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &PanelSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

pub(crate) fn apply_env_override(settings: &mut PanelSettings, value: Option<String>) {
    let Some(value) = value else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    tracing::info!("Using API base URL from {API_BASE_ENV}: {value}");
    settings.api.base_url = value.to_string();
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let tmp_path = path.with_extension(format!("toml.{}.tmp", std::process::id()));
    std::fs::write(&tmp_path, data).map_err(|source| ConfigError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp_path);
        ConfigError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
