//! # Validation Module
//!
//! Checks applied to configuration values before the banner or the
//! dashboard is built from them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config file / environment (storefront-live)                  │
//! │  ├── Type validation (TOML deserialization)                            │
//! │  └── StorefrontConfig::validate() calls into THIS MODULE               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (storefront-core)                               │
//! │  └── ImageList::new() re-checks every image reference                  │
//! │                                                                         │
//! │  Backend records are NEVER validated: they are aggregated tolerantly.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_image_reference, validate_page_size};
//!
//! validate_image_reference("https://i.imgur.com/uKJe62C.png").unwrap();
//! validate_page_size(10).unwrap();
//! ```

use url::Url;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest image reference accepted.
const MAX_REFERENCE_LEN: usize = 2048;

// =============================================================================
// Reference Validators
// =============================================================================

/// Validates a banner image reference.
///
/// ## Rules
/// - Must not be empty
/// - At most 2048 characters
/// - Either a site-relative path (`/static/hero.png`) or an absolute
///   `http`/`https` URL
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_image_reference;
///
/// assert!(validate_image_reference("https://i.imgur.com/dC3bo1W.png").is_ok());
/// assert!(validate_image_reference("/static/hero.png").is_ok());
/// assert!(validate_image_reference("ftp://files/hero.png").is_err());
/// assert!(validate_image_reference("").is_err());
/// ```
pub fn validate_image_reference(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if reference.len() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "image".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    if reference.starts_with('/') && !reference.starts_with("//") {
        return Ok(());
    }

    let url = Url::parse(reference).map_err(|e| ValidationError::InvalidFormat {
        field: "image".to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::NotAllowed {
            field: "image scheme".to_string(),
            allowed: vec!["http".to_string(), "https".to_string()],
        }),
    }
}

/// Validates an in-app navigation target such as `/products`.
pub fn validate_navigation_target(target: &str) -> ValidationResult<()> {
    let target = target.trim();

    if target.is_empty() {
        return Err(ValidationError::Required {
            field: "target".to_string(),
        });
    }

    if !target.starts_with('/') || target.starts_with("//") {
        return Err(ValidationError::InvalidFormat {
            field: "target".to_string(),
            reason: "must be a site-relative path starting with '/'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Display Validators
// =============================================================================

/// Validates the call-to-action label (1-40 characters).
pub fn validate_cta_label(label: &str) -> ValidationResult<()> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "cta_label".to_string(),
        });
    }

    if label.chars().count() > 40 {
        return Err(ValidationError::TooLong {
            field: "cta_label".to_string(),
            max: 40,
        });
    }

    Ok(())
}

/// Validates the currency suffix. Empty is allowed (plain numbers).
pub fn validate_currency_suffix(suffix: &str) -> ValidationResult<()> {
    if suffix.chars().count() > 8 {
        return Err(ValidationError::TooLong {
            field: "currency_suffix".to_string(),
            max: 8,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the banner rotation period.
///
/// ## Rules
/// - Between 100 ms and 10 minutes
pub fn validate_interval_ms(interval_ms: u64) -> ValidationResult<()> {
    if !(100..=600_000).contains(&interval_ms) {
        return Err(ValidationError::OutOfRange {
            field: "interval_ms".to_string(),
            min: 100,
            max: 600_000,
        });
    }

    Ok(())
}

/// Validates the order table page size (1-100 rows).
pub fn validate_page_size(page_size: usize) -> ValidationResult<()> {
    if !(1..=100).contains(&page_size) {
        return Err(ValidationError::OutOfRange {
            field: "page_size".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_reference() {
        // Valid references
        assert!(validate_image_reference("https://i.imgur.com/uKJe62C.png").is_ok());
        assert!(validate_image_reference("http://localhost:3000/hero.jpg").is_ok());
        assert!(validate_image_reference("/assets/hero.webp").is_ok());

        // Invalid references
        assert!(validate_image_reference("").is_err());
        assert!(validate_image_reference("   ").is_err());
        assert!(validate_image_reference("hero.png").is_err());
        assert!(validate_image_reference("//cdn.example.com/hero.png").is_err());
        assert!(validate_image_reference("javascript:alert(1)").is_err());
        assert!(validate_image_reference(&format!("/{}", "a".repeat(3000))).is_err());
    }

    #[test]
    fn test_validate_navigation_target() {
        assert!(validate_navigation_target("/products").is_ok());
        assert!(validate_navigation_target("/order/64f0c1").is_ok());

        assert!(validate_navigation_target("").is_err());
        assert!(validate_navigation_target("products").is_err());
        assert!(validate_navigation_target("//evil.example.com").is_err());
    }

    #[test]
    fn test_validate_cta_label() {
        assert!(validate_cta_label("Shop Now").is_ok());
        assert!(validate_cta_label("").is_err());
        assert!(validate_cta_label(&"x".repeat(41)).is_err());
    }

    #[test]
    fn test_validate_currency_suffix() {
        assert!(validate_currency_suffix("đ").is_ok());
        assert!(validate_currency_suffix("").is_ok());
        assert!(validate_currency_suffix(" VND").is_ok());
        assert!(validate_currency_suffix("123456789").is_err());
    }

    #[test]
    fn test_validate_interval_ms() {
        assert!(validate_interval_ms(5000).is_ok());
        assert!(validate_interval_ms(100).is_ok());
        assert!(validate_interval_ms(99).is_err());
        assert!(validate_interval_ms(0).is_err());
        assert!(validate_interval_ms(600_001).is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(10).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
    }
}
