use docana_kernel::DocanaError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Kernel(#[from] DocanaError),

    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid TOML at {path}: {message}")]
    InvalidToml { path: String, message: String },

    #[error("invalid JSON at {path}: {message}")]
    InvalidJson { path: String, message: String },
}

impl ReportError {
    pub(crate) fn io(path: impl std::fmt::Display, error: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_string(),
            message: error.to_string(),
        }
    }
}
