//! User configuration (`config.toml` in the platform config dir).

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What the sheet dump prints for each cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpMode {
    #[default]
    Values,
    Texts,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default dump mode when neither `--values` nor `--texts` is given.
    pub mode: DumpMode,
    /// Log filter used when `RECKON_LOG` is unset.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: DumpMode::Values,
            log: "warn".to_string(),
        }
    }
}

/// Load the config, falling back to defaults.
///
/// Problems are returned as warnings rather than errors so a broken config
/// file never prevents the sheet from being processed.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::read_to_string(&path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => config,
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                Config::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            Config::default()
        }
    };
    (config, warnings)
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "reckon")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
