use std::path::PathBuf;

/// Failures at the crate's I/O boundaries. The simulation itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed high-score record in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
