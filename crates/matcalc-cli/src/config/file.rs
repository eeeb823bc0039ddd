use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSetupConfig {
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(rename = "new-coline")]
    pub new_coline: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "application-directory")]
    pub application_directory: Option<PathBuf>,
    #[serde(rename = "library-file")]
    pub library_file: Option<PathBuf>,
    #[serde(rename = "change-working-directory")]
    pub change_working_directory: Option<bool>,
    pub setup: Option<FileSetupConfig>,
}

impl FileConfig {
    /// Reads a session file. Relative paths inside it are taken relative to the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading session file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.application_directory = config
            .application_directory
            .map(|dir| relative_to(base, dir));
        config.library_file = config.library_file.map(|file| relative_to(base, file));
        Ok(config)
    }
}

fn relative_to(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
