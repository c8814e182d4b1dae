use snafu::prelude::*;

use crate::config::ConfigKey;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CogdemoError {
    #[snafu(display("Configuration `{}` not set, export {}", key, key.env_name()))]
    MissingConfig { key: ConfigKey },
    #[snafu(display("Invalid configuration: {}", message))]
    InvalidConfig { message: String },
    #[snafu(display("Request `{}` error: {}", stage, source))]
    Transport {
        source: reqwest::Error,
        stage: String,
    },
    #[snafu(display("Service answered HTTP {} `{}`: {}", status, code, message))]
    UnexpectedStatus {
        status: u16,
        code: String,
        message: String,
    },
    #[snafu(display("Document `{}` failed analysis `{}`: {}", id, code, message))]
    PartialFailure {
        id: String,
        code: String,
        message: String,
    },
    #[snafu(display("Decode `{}` response error: {}", stage, source))]
    Decode {
        source: serde_json::Error,
        stage: String,
    },
    #[snafu(display("Invalid `{}` response: {}", stage, message))]
    InvalidResponse { stage: String, message: String },
    #[snafu(display("Nothing to analyze: {}", what))]
    EmptyInput { what: String },
    #[snafu(display("Image Open `{}` error: {}", path, source))]
    ImageOpen {
        source: image::ImageError,
        path: String,
    },
    #[snafu(display("Image Write `{}` error: {}", path, source))]
    ImageWrite {
        source: image::ImageError,
        path: String,
    },
    #[snafu(display("Read `{}` error: {}", path, source))]
    IoRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Console I/O error: {}", source))]
    Console { source: std::io::Error },
}

/// Coarse classification of [`CogdemoError`], for callers deciding
/// between fatal and recoverable handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration, or unusable input.
    Configuration,
    /// Connection, TLS, timeout and similar failures.
    Transport,
    /// One document of a batch failed analysis; the others are usable.
    PartialFailure,
    /// The service answered with a non-success status.
    UnexpectedStatus,
    /// The response body did not match the expected schema.
    Decode,
    /// Local file or terminal I/O.
    Io,
}

impl CogdemoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfig { .. } | Self::InvalidConfig { .. } | Self::EmptyInput { .. } => {
                ErrorKind::Configuration
            }
            Self::Transport { .. } => ErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::PartialFailure { .. } => ErrorKind::PartialFailure,
            Self::Decode { .. } | Self::InvalidResponse { .. } => ErrorKind::Decode,
            Self::ImageOpen { .. }
            | Self::ImageWrite { .. }
            | Self::IoRead { .. }
            | Self::Console { .. } => ErrorKind::Io,
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for CogdemoError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        match ConfigKey::from_field(err.field_name()) {
            Some(key) => Self::MissingConfig { key },
            None => Self::InvalidConfig {
                message: err.to_string(),
            },
        }
    }
}
