use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] coinscope_core::ValidationError),

    #[error(transparent)]
    Config(#[from] coinscope_core::ConfigError),

    #[error(transparent)]
    Locator(#[from] coinscope_core::LocatorError),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 2,
            Self::Locator(_) => 2,
            Self::Timestamp(_) => 6,
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
