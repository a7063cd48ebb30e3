use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use stringsheet::Languages;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Stringsheet(#[from] stringsheet::Error),
}

/// Contents of a `stringsheet.toml` file. All keys are optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Language codes in column order.
    pub languages: Option<Vec<String>>,
    /// Directory searched for `.strings` files.
    pub root: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings of one run: flags win over the config file, which wins
/// over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub languages: Languages,
}

impl Settings {
    pub fn resolve(
        file: FileConfig,
        root_flag: Option<PathBuf>,
        languages_flag: Option<&str>,
    ) -> Result<Self, CliError> {
        let languages = match (languages_flag, file.languages) {
            (Some(flag), _) => flag.parse()?,
            (None, Some(list)) => Languages::new(list)?,
            (None, None) => Languages::default(),
        };
        let root = root_flag
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Settings { root, languages })
    }
}
