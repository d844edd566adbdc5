//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Misconfiguration (fail fast)                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-live errors (separate crate)                               │
//! │  └── LiveError        - Config files, channels, shutdown               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LiveError → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Irregular data from the backend never produces an error here. A missing
//! collection is an empty collection and a record with missing fields
//! contributes zero. Errors are reserved for programming/configuration
//! mistakes such as an empty banner image list.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core configuration errors.
///
/// These indicate a programming or deployment mistake, not transient data
/// absence, and are raised at construction time.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The banner was configured without any image.
    ///
    /// ## When This Occurs
    /// ```text
    /// [banner]
    /// images = []          ◄── nothing to rotate through
    ///      │
    ///      ▼
    /// ImageList::new(vec![])
    ///      │
    ///      ▼
    /// EmptyImageList (startup aborted, never an out-of-bounds index later)
    /// ```
    #[error("Banner image list must contain at least one image")]
    EmptyImageList,

    /// An entry of the banner image list is not a usable image reference.
    #[error("Banner image #{index} ('{reference}') is invalid: {reason}")]
    InvalidImageReference {
        index: usize,
        reference: String,
        reason: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparsable URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
