//! Error types for the front controller.

use std::path::PathBuf;

use tabouret_router::RouterError;

/// Errors raised while configuring or running an application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Routing failed (bad rule, unknown route, missing parameter, ...).
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The config file does not exist.
    #[error("Config file \"{0}\" not found")]
    ConfigNotFound(PathBuf),

    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path to the config file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// A handler was registered for something that is not a target triple.
    #[error("Invalid handler target '{0}' (expected module.controller.action)")]
    InvalidTarget(String),

    /// A handler failed.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl AppError {
    /// Creates a handler error from any message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
