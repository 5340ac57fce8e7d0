use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0} not found in environment")]
    ConfigMissing(String),

    #[error("file_name must have a file extension: {0}")]
    ConfigInvalid(String),

    #[error("invalid configuration: {0}")]
    ConfigParse(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("no files found in {bucket} ending with {suffix}")]
    NoMatchingFiles { bucket: String, suffix: String },

    #[error("failed to {operation}: {message}")]
    Provider { operation: String, message: String },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn provider(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        FetchError::Provider {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short tag attached to log records as `error_group`.
    pub fn group(&self) -> &'static str {
        match self {
            FetchError::ConfigMissing(_) => "config_missing",
            FetchError::ConfigInvalid(_) => "config_invalid",
            FetchError::ConfigParse(_) => "config_invalid",
            FetchError::BucketNotFound(_) => "bucket_not_found",
            FetchError::NoMatchingFiles { .. } => "no_matching_files",
            FetchError::Provider { .. } => "provider",
            FetchError::Io { .. } => "io",
        }
    }

    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<clap::Error> for FetchError {
    fn from(err: clap::Error) -> Self {
        FetchError::ConfigParse(err.to_string().trim_end().to_string())
    }
}
