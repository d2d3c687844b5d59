use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the tray tools.
#[derive(Debug, Error)]
pub enum TrayError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but its top level is not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },

    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl TrayError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = TrayError> = std::result::Result<T, E>;
