//! Error types for the engine binary.

/// Errors that can occur during engine startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: siphon_core::ConfigError,
    },

    /// The configuration named no supply nodes, so there is nothing to
    /// demonstrate.
    #[error("no supply nodes configured")]
    NoNodes,
}
