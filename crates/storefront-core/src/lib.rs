//! # storefront-core: Pure Display Logic for the Storefront
//!
//! This crate holds the logic behind the storefront's hero banner and the
//! seller dashboard as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend (rendering)                     │   │
//! │  │    Hero Banner ──► Overview Cards ──► Order Table ──► Charts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribes (watch channels)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-live (Tokio tasks)                      │   │
//! │  │    BannerService (5s timer)      DashboardFeed (snapshots)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  banner   │  │ dashboard │  │   │
//! │  │   │  Order    │  │   Money   │  │ ImageList │  │ Histogram │  │   │
//! │  │   │  Product  │  │ Currency  │  │ Rotation  │  │ OrderRow  │  │   │
//! │  │   │  Seller   │  │  Format   │  │  Frame    │  │ Balance   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Backend records (orders, products, seller) and snapshots
//! - [`money`] - Money type and currency formatting
//! - [`banner`] - Image list and rotation state machine
//! - [`dashboard`] - Aggregation into rows, histograms, charts and cards
//! - [`error`] - Configuration and validation errors
//! - [`validation`] - Checks on configuration values
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, same dashboard out
//! 2. **Tolerant Aggregation**: irregular backend data never errors
//! 3. **Fail Fast on Misconfiguration**: an empty banner list is rejected
//!    at construction
//! 4. **Integer Money**: backend floats become cents exactly once
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use storefront_core::dashboard::{build_dashboard_summary, DashboardSettings};
//! use storefront_core::DashboardSnapshot;
//!
//! let snapshot = DashboardSnapshot::from_json(&json!({
//!     "orders": [
//!         { "_id": "o1", "cart": [{ "qty": 2 }, { "qty": 3 }], "totalPrice": 1000, "status": "Delivered" }
//!     ],
//!     "seller": { "_id": "shop-1", "availableBalance": 30 }
//! }));
//!
//! let summary = build_dashboard_summary(&snapshot, &DashboardSettings::default());
//! assert_eq!(summary.orders.rows[0].items_qty, 5);
//! assert_eq!(summary.orders.rows[0].total, "1.000đ");
//! assert_eq!(summary.balance.as_array(), [30.0, 70.0]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod banner;
pub mod dashboard;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use banner::{BannerFrame, CallToAction, ImageList, Rotation, RotationState};
pub use dashboard::{DashboardSettings, DashboardSummary, Histogram, OrderRow};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Banner rotation period.
pub const DEFAULT_BANNER_INTERVAL_MS: u64 = 5000;

/// Hero images shipped with the storefront.
pub const DEFAULT_BANNER_IMAGES: &[&str] = &[
    "https://i.imgur.com/uKJe62C.png",
    "https://i.imgur.com/dC3bo1W.png",
    "https://i.imgur.com/oP9Ucvg.png",
];

/// Banner call to action.
pub const DEFAULT_CTA_LABEL: &str = "Shop Now";
pub const DEFAULT_CTA_TARGET: &str = "/products";

/// Appended to every formatted amount.
pub const DEFAULT_CURRENCY_SUFFIX: &str = "đ";

/// Rows per page of the order table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The balance pie is drawn against 100 (in cents here).
pub const BALANCE_THRESHOLD_CENTS: i64 = 10_000;

/// Status that marks an order as finished.
pub const DELIVERED_STATUS: &str = "Delivered";

/// Group label for orders without a status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Stock histogram labels.
pub const IN_STOCK_LABEL: &str = "In Stock";
pub const OUT_OF_STOCK_LABEL: &str = "Out of Stock";
