use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No mc_core library found in '{}'", .directory.display())]
    LibraryNotFound { directory: PathBuf },

    #[error("Failed to load engine library '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Required symbol '{symbol}' is not exported by the engine library")]
    MissingSymbol { symbol: &'static str },

    #[error("Cannot access application directory '{}': {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Application directory '{}' cannot be passed to the engine as text", .path.display())]
    InvalidApplicationDirectory { path: PathBuf },

    #[error("Text contains a NUL byte and cannot be sent to the engine: {text:?}")]
    InteriorNul { text: String },

    #[error("Err nr {code} while executing '{command}'")]
    Command { code: i32, command: String },

    #[error("Err nr {code} while calculating equilibrium")]
    Equilibrium { code: i32 },
}

impl EngineError {
    /// Whether this error is a status code reported by the engine itself, as opposed to
    /// a failure on this side of the boundary.
    pub fn is_engine_status(&self) -> bool {
        matches!(self, Self::Command { .. } | Self::Equilibrium { .. })
    }
}
