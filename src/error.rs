use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the I/O shell around the game core.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read score file {}: {source}", path.display())]
    ScoreRead { path: PathBuf, source: io::Error },

    #[error("failed to write score file {}: {source}", path.display())]
    ScoreWrite { path: PathBuf, source: io::Error },

    #[error("score file {} is malformed: {source}", path.display())]
    ScoreFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
