use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CovmapError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("git {operation} failed for {path}: {source}")]
    Git {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("{} (No such file or directory)", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("invalid class file {path}: {message}")]
    ClassFormat { path: PathBuf, message: String },

    #[error("invalid execution data {path}: {message}")]
    ExecFormat { path: PathBuf, message: String },

    #[error("incompatible execution data for class {name} (id {id:016x}): {message}")]
    IncompatibleExecData {
        id: u64,
        name: String,
        message: String,
    },

    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    #[error("test command failed to start: {command}: {message}")]
    TestCommand { command: String, message: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CovmapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn git(operation: &'static str, path: impl Into<PathBuf>, source: git2::Error) -> Self {
        Self::Git {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn is_recoverable_per_class(&self) -> bool {
        matches!(self, Self::ArtifactNotFound { .. })
    }
}
