use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{method}() key must be a non-empty string")]
    InvalidKey { method: &'static str },

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("initialization failed at {path}: {source}")]
    Initialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save failed at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("value at `{key}` has unexpected type: {source}")]
    Type {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("save worker exited without reporting")]
    WorkerGone,
}
