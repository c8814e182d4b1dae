pub mod analysis;
pub mod client;
pub mod config;
pub mod consts;
pub mod error;
pub mod format;

use tracing_subscriber::EnvFilter;

// Re-export commonly used types
pub use client::{
    Service, ServiceSession,
    conversation::{ConversationPrediction, ConversationSession},
    entities::{EntityRecognition, EntitySession, EntityTask},
    vision::{TextAnalysis, VisionSession},
};
pub use config::{ConfigKey, ServiceArgs, ServiceConfig};
pub use error::{CogdemoError, ErrorKind};

/// Installs the log subscriber used by the demo binaries.
///
/// Logs go to stderr so stdout only carries the printed results. The
/// filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
