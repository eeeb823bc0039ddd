use std::path::PathBuf;
use thiserror::Error;

/// Environment variable conventionally holding the MatCalc application directory.
pub const APPLICATION_DIRECTORY_ENV: &str = "MATCALC_DIR";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// How to open an engine handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// MatCalc installation directory. The engine is told to treat it as its root.
    pub application_directory: PathBuf,
    /// Explicit library file. When `None` the library is located inside
    /// `application_directory`.
    pub library_file: Option<PathBuf>,
    /// Change the process working directory to `application_directory` before loading.
    pub change_working_directory: bool,
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    application_directory: Option<PathBuf>,
    library_file: Option<PathBuf>,
    change_working_directory: Option<bool>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn application_directory(mut self, path: PathBuf) -> Self {
        self.application_directory = Some(path);
        self
    }
    pub fn library_file(mut self, path: Option<PathBuf>) -> Self {
        self.library_file = path;
        self
    }
    pub fn change_working_directory(mut self, change: bool) -> Self {
        self.change_working_directory = Some(change);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            application_directory: self
                .application_directory
                .ok_or(ConfigError::MissingParameter("application_directory"))?,
            library_file: self.library_file,
            change_working_directory: self.change_working_directory.unwrap_or(true),
        })
    }
}
