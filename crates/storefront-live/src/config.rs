//! # Storefront Configuration
//!
//! Configuration for the banner and the dashboard.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_BANNER_IMAGES=https://a.png,https://b.png               │
//! │     STOREFRONT_BANNER_INTERVAL_MS=5000                                 │
//! │     STOREFRONT_CURRENCY_SUFFIX=đ                                       │
//! │     STOREFRONT_PAGE_SIZE=10                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.shop/... (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     3 hero images, 5s rotation, "đ" suffix, 10 rows per page           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [banner]
//! images = [
//!     "https://i.imgur.com/uKJe62C.png",
//!     "https://i.imgur.com/dC3bo1W.png",
//! ]
//! interval_ms = 5000
//! cta_label = "Shop Now"
//! cta_target = "/products"
//!
//! [dashboard]
//! currency_suffix = "đ"
//! page_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use storefront_core::validation::{
    validate_cta_label, validate_currency_suffix, validate_interval_ms,
    validate_navigation_target, validate_page_size,
};
use storefront_core::{
    CallToAction, CurrencyFormat, DashboardSettings, ImageList, DEFAULT_BANNER_IMAGES,
    DEFAULT_BANNER_INTERVAL_MS, DEFAULT_CTA_LABEL, DEFAULT_CTA_TARGET, DEFAULT_CURRENCY_SUFFIX,
    DEFAULT_PAGE_SIZE,
};

use crate::error::{LiveError, LiveResult};

// =============================================================================
// Banner Settings
// =============================================================================

/// Hero banner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerSettings {
    /// Images to rotate through, in order. Must not be empty.
    #[serde(default = "default_images")]
    pub images: Vec<String>,

    /// Rotation period (milliseconds).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Call-to-action label.
    #[serde(default = "default_cta_label")]
    pub cta_label: String,

    /// Call-to-action route.
    #[serde(default = "default_cta_target")]
    pub cta_target: String,
}

fn default_images() -> Vec<String> {
    DEFAULT_BANNER_IMAGES.iter().map(|s| s.to_string()).collect()
}

fn default_interval_ms() -> u64 {
    DEFAULT_BANNER_INTERVAL_MS
}

fn default_cta_label() -> String {
    DEFAULT_CTA_LABEL.to_string()
}

fn default_cta_target() -> String {
    DEFAULT_CTA_TARGET.to_string()
}

impl Default for BannerSettings {
    fn default() -> Self {
        BannerSettings {
            images: default_images(),
            interval_ms: default_interval_ms(),
            cta_label: default_cta_label(),
            cta_target: default_cta_target(),
        }
    }
}

// =============================================================================
// Dashboard Config
// =============================================================================

/// Seller dashboard display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Appended to formatted amounts.
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    /// Rows per page in the order table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_currency_suffix() -> String {
    DEFAULT_CURRENCY_SUFFIX.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            currency_suffix: default_currency_suffix(),
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub banner: BannerSettings,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LiveResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with overrides read through `lookup`.
    fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> LiveResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> LiveResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| LiveError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> LiveResult<()> {
        ImageList::new(self.banner.images.clone())?;
        validate_interval_ms(self.banner.interval_ms)?;
        validate_cta_label(&self.banner.cta_label)?;
        validate_navigation_target(&self.banner.cta_target)?;
        validate_currency_suffix(&self.dashboard.currency_suffix)?;
        validate_page_size(self.dashboard.page_size)?;
        Ok(())
    }

    /// Applies overrides from any key lookup (environment in production).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(images) = lookup("STOREFRONT_BANNER_IMAGES") {
            let images: Vec<String> = images
                .split(',')
                .map(str::trim)
                .filter(|image| !image.is_empty())
                .map(str::to_string)
                .collect();
            debug!(count = images.len(), "Overriding banner images from environment");
            self.banner.images = images;
        }

        if let Some(interval) = lookup("STOREFRONT_BANNER_INTERVAL_MS") {
            match interval.parse::<u64>() {
                Ok(ms) => self.banner.interval_ms = ms,
                Err(_) => warn!(value = %interval, "Ignoring non-numeric banner interval"),
            }
        }

        if let Some(suffix) = lookup("STOREFRONT_CURRENCY_SUFFIX") {
            self.dashboard.currency_suffix = suffix;
        }

        if let Some(page_size) = lookup("STOREFRONT_PAGE_SIZE") {
            match page_size.parse::<usize>() {
                Ok(size) => self.dashboard.page_size = size,
                Err(_) => warn!(value = %page_size, "Ignoring non-numeric page size"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "shop")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Validated banner image list.
    pub fn image_list(&self) -> LiveResult<ImageList> {
        Ok(ImageList::new(self.banner.images.clone())?)
    }

    /// Banner rotation period.
    pub fn banner_interval(&self) -> Duration {
        Duration::from_millis(self.banner.interval_ms)
    }

    pub fn call_to_action(&self) -> CallToAction {
        CallToAction {
            label: self.banner.cta_label.clone(),
            target: self.banner.cta_target.clone(),
        }
    }

    /// Settings handed to the dashboard aggregation.
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            currency: CurrencyFormat::with_suffix(self.dashboard.currency_suffix.clone()),
            page_size: self.dashboard.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("storefront-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.banner.images.len(), 3);
        assert_eq!(config.banner.interval_ms, 5000);
        assert_eq!(config.dashboard.currency_suffix, "đ");
        assert_eq!(config.dashboard.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.banner.images.clear();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(
            err,
            LiveError::Core(storefront_core::CoreError::EmptyImageList)
        ));

        config.banner.images = vec!["/hero.png".to_string()];
        assert!(config.validate().is_ok());

        config.banner.interval_ms = 0;
        assert!(config.validate().is_err());

        config.banner.interval_ms = 5000;
        config.banner.cta_target = "products".to_string();
        assert!(config.validate().is_err());

        config.banner.cta_target = "/products".to_string();
        config.dashboard.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup_from(&[
            ("STOREFRONT_BANNER_IMAGES", " https://a.example/1.png , ,/local.png "),
            ("STOREFRONT_BANNER_INTERVAL_MS", "2500"),
            ("STOREFRONT_CURRENCY_SUFFIX", " VND"),
            ("STOREFRONT_PAGE_SIZE", "25"),
        ]));

        assert_eq!(
            config.banner.images,
            vec!["https://a.example/1.png".to_string(), "/local.png".to_string()]
        );
        assert_eq!(config.banner_interval(), Duration::from_millis(2500));
        assert_eq!(config.dashboard.currency_suffix, " VND");
        assert_eq!(config.dashboard.page_size, 25);
    }

    #[test]
    fn test_malformed_numeric_overrides_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup_from(&[
            ("STOREFRONT_BANNER_INTERVAL_MS", "fast"),
            ("STOREFRONT_PAGE_SIZE", "-1"),
        ]));

        assert_eq!(config.banner.interval_ms, 5000);
        assert_eq!(config.dashboard.page_size, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [banner]
            interval_ms = 8000
            "#,
        )
        .unwrap();

        assert_eq!(config.banner.interval_ms, 8000);
        assert_eq!(config.banner.images.len(), 3);
        assert_eq!(config.banner.cta_label, "Shop Now");
        assert_eq!(config.dashboard, DashboardConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("storefront.toml");
        let mut config = StorefrontConfig::default();
        config.banner.images = vec!["/hero-a.png".to_string(), "/hero-b.png".to_string()];
        config.dashboard.page_size = 20;

        config.save(Some(path.clone())).unwrap();
        let loaded = StorefrontConfig::load_with(Some(path.clone()), lookup_from(&[])).unwrap();
        assert_eq!(loaded.banner.images, config.banner.images);
        assert_eq!(loaded.dashboard.page_size, 20);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = temp_path("invalid.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[banner]\nimages = []\n").unwrap();

        let err = StorefrontConfig::load_with(Some(path.clone()), lookup_from(&[])).unwrap_err();
        assert!(err.is_config_error());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_applies_overrides_over_file() {
        let path = temp_path("overridden.toml");
        let mut config = StorefrontConfig::default();
        config.dashboard.page_size = 20;
        config.save(Some(path.clone())).unwrap();

        let loaded = StorefrontConfig::load_with(
            Some(path.clone()),
            lookup_from(&[("STOREFRONT_PAGE_SIZE", "5")]),
        )
        .unwrap();
        assert_eq!(loaded.dashboard.page_size, 5);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_derived_settings() {
        let config = StorefrontConfig::default();

        let cta = config.call_to_action();
        assert_eq!(cta.label, "Shop Now");
        assert_eq!(cta.target, "/products");

        let settings = config.dashboard_settings();
        assert_eq!(settings.currency.suffix, "đ");
        assert_eq!(settings.page_size, 10);

        assert_eq!(config.image_list().unwrap().len(), 3);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&StorefrontConfig::default()).unwrap();
        assert!(toml_str.contains("[banner]"));
        assert!(toml_str.contains("[dashboard]"));
    }
}
