//! Error types for the server binary.
//!
//! [`BinError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum BinError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: biochar_core::ConfigError,
    },

    /// The log filter could not be built from the configured level.
    #[error("invalid log level {level:?}: {message}")]
    LogFilter {
        /// The rejected level string.
        level: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: biochar_api::ServerError,
    },
}
