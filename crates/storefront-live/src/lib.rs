//! # storefront-live: Runtime Layer for the Storefront
//!
//! Runs the pure `storefront-core` logic on Tokio: the hero banner timer
//! and the seller dashboard feed.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Runtime                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  StorefrontConfig (TOML + env)                   │  │
//! │  └───────────────┬──────────────────────────────┬───────────────────┘  │
//! │                  ▼                              ▼                      │
//! │  ┌────────────────────────────┐  ┌──────────────────────────────────┐  │
//! │  │ BannerService              │  │ DashboardFeed                    │  │
//! │  │                            │  │                                  │  │
//! │  │ One interval per list      │  │ Holds orders/products/seller     │  │
//! │  │ (i + 1) mod N every tick   │  │ Recomputes on every change       │  │
//! │  │ Publishes BannerFrame      │  │ Publishes DashboardView          │  │
//! │  └─────────────┬──────────────┘  └───────────────┬──────────────────┘  │
//! │                │ watch                           │ watch + observer     │
//! │                ▼                                 ▼                      │
//! │        BannerHandle                      DashboardFeedHandle            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`banner`] - Banner rotation task and handle
//! - [`config`] - Storefront configuration (file + environment)
//! - [`error`] - Runtime error types
//! - [`feed`] - Dashboard feed task, handle and observer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_live::{BannerService, DashboardFeed, StorefrontConfig};
//!
//! let config = StorefrontConfig::load_or_default(None);
//!
//! let banner = BannerService::from_config(&config)?.start();
//! println!("Showing {}", banner.current_image());
//!
//! let feed = DashboardFeed::from_config(&config).start();
//! feed.set_orders(Some(orders)).await?;
//! let view = feed.current();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod banner;
pub mod config;
pub mod error;
pub mod feed;

// =============================================================================
// Re-exports
// =============================================================================

pub use banner::{BannerHandle, BannerService};
pub use config::{BannerSettings, DashboardConfig, StorefrontConfig};
pub use error::{LiveError, LiveResult};
pub use feed::{
    DashboardFeed, DashboardFeedHandle, DashboardObserver, DashboardView, FetchRequest,
    NoOpObserver,
};
