use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Looked up in the working directory, in order, when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["tickload.toml", "tickload.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> AppResult<Self> {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return Err(AppError::config(ConfigError::MissingExtension));
        };
        if ext.eq_ignore_ascii_case("toml") {
            Ok(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }))
        }
    }

    fn parse(self, path: &Path, content: &str) -> AppResult<ConfigFile> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|err| {
                AppError::config(ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source: err,
                })
            }),
            Self::Json => serde_json::from_str(content).map_err(|err| {
                AppError::config(ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source: err,
                })
            }),
        }
    }
}

/// Loads the explicit config file, or the first default one found in the
/// working directory.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => find_default_config(Path::new(".")),
    };
    chosen.map(|path| load_config_file(&path)).transpose()
}

pub(crate) fn find_default_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    // Reject unknown formats before touching the file.
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    format.parse(path, &content)
}
