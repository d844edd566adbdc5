//! # Live Error Types
//!
//! Error types for the runtime layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Live Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Runtime      │  │     Core                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigLoad…    │  │  ChannelError   │  │  EmptyImageList         │ │
//! │  │  ConfigSave…    │  │  ShuttingDown   │  │  InvalidImageReference  │ │
//! │  │                 │  │                 │  │  Validation             │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use storefront_core::CoreError;

/// Result type alias for runtime operations.
pub type LiveResult<T> = Result<T, LiveError>;

/// Runtime error type.
#[derive(Debug, Error)]
pub enum LiveError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// Channel send/receive failed.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// The task behind a handle has stopped.
    #[error("{0} is shutting down")]
    ShuttingDown(&'static str),

    // =========================================================================
    // Core Errors
    // =========================================================================
    /// Misconfiguration detected by storefront-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for LiveError {
    fn from(err: std::io::Error) -> Self {
        LiveError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for LiveError {
    fn from(err: toml::de::Error) -> Self {
        LiveError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for LiveError {
    fn from(err: toml::ser::Error) -> Self {
        LiveError::ConfigSaveFailed(err.to_string())
    }
}

impl From<storefront_core::ValidationError> for LiveError {
    fn from(err: storefront_core::ValidationError) -> Self {
        LiveError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl LiveError {
    /// Returns true if this error indicates a configuration problem.
    ///
    /// Configuration problems are fatal at startup; nothing will fix them
    /// without a redeploy.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LiveError::ConfigLoadFailed(_)
                | LiveError::ConfigSaveFailed(_)
                | LiveError::Core(_)
        )
    }
}
