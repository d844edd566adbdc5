//! # Dashboard Aggregation
//!
//! Projects raw orders, products and the seller balance into the views the
//! seller dashboard renders.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DashboardSnapshot (inputs)                          │
//! │          orders?             products?             seller?              │
//! │             │                    │                    │                 │
//! │   ┌─────────┼──────────┐         │                    │                 │
//! │   ▼         ▼          │         ▼                    ▼                 │
//! │ build_    build_       │   build_stock_       build_balance_            │
//! │ order_    status_      │   histogram          split                     │
//! │ rows      histogram    │         │                    │                 │
//! │   │         │          │         ▼                    ▼                 │
//! │   ▼         ▼          ▼   ChartData           ChartData                │
//! │ OrderTable ChartData  SummaryCards ◄──────────────────┘                 │
//! │ (paged)   (count + %)                                                   │
//! │                                                                         │
//! │            All of it ──► DashboardSummary (one pure function)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Pure: identical input gives identical output, no hidden state
//! - Tolerant: `None` collections are empty, missing fields count as zero
//! - Order preserving: rows and histogram buckets follow input order

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{CurrencyFormat, Money};
use crate::types::{DashboardSnapshot, OrderRecord, ProductRecord};
use crate::{
    BALANCE_THRESHOLD_CENTS, DEFAULT_PAGE_SIZE, DELIVERED_STATUS, IN_STOCK_LABEL,
    OUT_OF_STOCK_LABEL,
};

// =============================================================================
// Navigation Targets
// =============================================================================

/// Route of the withdraw page linked from the balance card.
pub const WITHDRAW_PATH: &str = "/dashboard-withdraw-money";
/// Route of the full order list.
pub const ORDERS_PATH: &str = "/dashboard-orders";
/// Route of the full product list.
pub const PRODUCTS_PATH: &str = "/dashboard-products";

// =============================================================================
// Settings
// =============================================================================

/// Display settings the aggregation depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub currency: CurrencyFormat,
    /// Rows per page of the order table.
    pub page_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            currency: CurrencyFormat::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Order Rows
// =============================================================================

/// How a status cell is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Order reached the customer.
    Positive,
    /// Anything still in flight (or refunded).
    Negative,
}

impl StatusTone {
    pub fn for_status(status: &str) -> Self {
        if status == DELIVERED_STATUS {
            StatusTone::Positive
        } else {
            StatusTone::Negative
        }
    }
}

/// One row of the "Latest Orders" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    /// Sum of cart quantities.
    pub items_qty: i64,
    /// Formatted total, e.g. "1.000đ".
    pub total: String,
    pub status: String,
    pub tone: StatusTone,
    /// Order detail route, e.g. "/order/64f0c1".
    pub detail_path: String,
}

/// Builds one row per order, in input order.
///
/// ```rust
/// use storefront_core::dashboard::build_order_rows;
/// use storefront_core::money::CurrencyFormat;
///
/// assert!(build_order_rows(None, &CurrencyFormat::default()).is_empty());
/// assert!(build_order_rows(Some(&[][..]), &CurrencyFormat::default()).is_empty());
/// ```
pub fn build_order_rows(orders: Option<&[OrderRecord]>, currency: &CurrencyFormat) -> Vec<OrderRow> {
    orders
        .unwrap_or_default()
        .iter()
        .map(|order| {
            let status = order.status_label().to_string();
            OrderRow {
                id: order.id.clone(),
                items_qty: order.items_qty(),
                total: currency.format_amount(order.total_price.unwrap_or(0.0)),
                tone: StatusTone::for_status(&status),
                status,
                detail_path: format!("/order/{}", order.id),
            }
        })
        .collect()
}

/// Order rows split into fixed-size pages without reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTable {
    pub rows: Vec<OrderRow>,
    pub page_size: usize,
}

impl OrderTable {
    /// Wraps `rows`; a page size of zero is treated as one.
    pub fn new(rows: Vec<OrderRow>, page_size: usize) -> Self {
        OrderTable {
            rows,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages (zero for an empty table).
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// Rows of the zero-based `page`; empty past the last page.
    pub fn page(&self, page: usize) -> &[OrderRow] {
        let start = page.saturating_mul(self.page_size).min(self.rows.len());
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }
}

// =============================================================================
// Histogram
// =============================================================================

/// A single category and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistogramBucket {
    pub label: String,
    pub count: usize,
}

/// Category counts in first-seen order.
///
/// Backed by a plain vector; lookups are linear over a handful of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Histogram {
    buckets: Vec<HistogramBucket>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `label`.
    pub fn record(&mut self, label: &str) {
        match self.buckets.iter_mut().find(|bucket| bucket.label == label) {
            Some(bucket) => bucket.count += 1,
            None => self.buckets.push(HistogramBucket {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    /// Count for `label` (zero when never seen).
    pub fn get(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .find(|bucket| bucket.label == label)
            .map_or(0, |bucket| bucket.count)
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|bucket| bucket.label.clone()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|bucket| bucket.count).collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.count).sum()
    }

    /// Share of each bucket in percent, aligned with [`Histogram::labels`].
    ///
    /// Empty for an empty histogram, so there is never a division by zero.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.buckets
            .iter()
            .map(|bucket| bucket.count as f64 / total as f64 * 100.0)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistogramBucket> {
        self.buckets.iter()
    }
}

impl<'a> FromIterator<&'a str> for Histogram {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut histogram = Histogram::new();
        for label in iter {
            histogram.record(label);
        }
        histogram
    }
}

/// Counts orders per status.
///
/// ```rust
/// use storefront_core::dashboard::build_status_histogram;
///
/// assert!(build_status_histogram(None).is_empty());
/// assert!(build_status_histogram(Some(&[][..])).percentages().is_empty());
/// ```
pub fn build_status_histogram(orders: Option<&[OrderRecord]>) -> Histogram {
    orders
        .unwrap_or_default()
        .iter()
        .map(OrderRecord::status_label)
        .collect()
}

/// Counts products into "In Stock" / "Out of Stock".
///
/// Only the two fixed labels can appear; a bucket shows up once a product
/// falls into it, in first-seen order.
pub fn build_stock_histogram(products: Option<&[ProductRecord]>) -> Histogram {
    products
        .unwrap_or_default()
        .iter()
        .map(|product| {
            if product.in_stock {
                IN_STOCK_LABEL
            } else {
                OUT_OF_STOCK_LABEL
            }
        })
        .collect()
}

// =============================================================================
// Balance Split
// =============================================================================

/// The two pie slices of the balance chart: `[available, threshold]`.
///
/// `threshold = 100 - available` in percentage space. Values are NOT
/// clamped: a balance of 150 yields a threshold of -50.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BalanceSplit {
    pub available: f64,
    pub threshold: f64,
}

impl BalanceSplit {
    pub const LABELS: [&'static str; 2] = ["Available", "Threshold"];

    pub fn as_array(&self) -> [f64; 2] {
        [self.available, self.threshold]
    }

    /// True when one of the slices is negative (pie cannot be drawn
    /// faithfully).
    pub fn is_out_of_range(&self) -> bool {
        self.available < 0.0 || self.threshold < 0.0
    }
}

/// Splits `available_balance` against the fixed 100 threshold.
///
/// The balance is rounded to two decimals first; the subtraction happens
/// in cents so the slices always add up to exactly 100. Balances beyond
/// the `i64` cent range saturate.
///
/// ```rust
/// use storefront_core::dashboard::build_balance_split;
///
/// assert_eq!(build_balance_split(30.0).as_array(), [30.0, 70.0]);
/// assert_eq!(build_balance_split(150.0).as_array(), [150.0, -50.0]);
/// ```
pub fn build_balance_split(available_balance: f64) -> BalanceSplit {
    let available = Money::from_major(available_balance);
    let threshold = Money::from_cents(BALANCE_THRESHOLD_CENTS) - available;
    BalanceSplit {
        available: available.to_major(),
        threshold: threshold.to_major(),
    }
}

// =============================================================================
// Chart Data
// =============================================================================

/// A named data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
}

/// Labels plus one or more aligned series, ready for a chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Two-series bar chart: "Orders Count" and "Orders Percentage".
pub fn build_status_chart(histogram: &Histogram) -> ChartData {
    ChartData {
        labels: histogram.labels(),
        series: vec![
            ChartSeries {
                label: "Orders Count".to_string(),
                data: histogram.counts().into_iter().map(|c| c as f64).collect(),
            },
            ChartSeries {
                label: "Orders Percentage".to_string(),
                data: histogram.percentages(),
            },
        ],
    }
}

/// Single-series bar chart of the stock histogram.
pub fn build_stock_chart(histogram: &Histogram) -> ChartData {
    ChartData {
        labels: histogram.labels(),
        series: vec![ChartSeries {
            label: "Products".to_string(),
            data: histogram.counts().into_iter().map(|c| c as f64).collect(),
        }],
    }
}

/// Pie chart of the balance split.
pub fn build_balance_chart(split: &BalanceSplit) -> ChartData {
    ChartData {
        labels: BalanceSplit::LABELS.iter().map(|l| l.to_string()).collect(),
        series: vec![ChartSeries {
            label: "Balance".to_string(),
            data: split.as_array().to_vec(),
        }],
    }
}

/// Tooltip text for a percentage value, e.g. `66.67%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

// =============================================================================
// Summary Cards
// =============================================================================

/// One of the overview cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub title: String,
    pub note: Option<String>,
    pub value: String,
    pub link_label: String,
    pub link_target: String,
}

/// Balance, order count and product count cards.
pub fn build_summary_cards(snapshot: &DashboardSnapshot, currency: &CurrencyFormat) -> Vec<SummaryCard> {
    let balance = snapshot
        .seller
        .as_ref()
        .map(|seller| seller.available_balance())
        .unwrap_or_default();
    let order_count = snapshot.orders.as_ref().map_or(0, Vec::len);
    let product_count = snapshot.products.as_ref().map_or(0, Vec::len);

    vec![
        SummaryCard {
            title: "Account Balance".to_string(),
            note: Some("with 10% service charge".to_string()),
            value: currency.format(balance),
            link_label: "Withdraw Money".to_string(),
            link_target: WITHDRAW_PATH.to_string(),
        },
        SummaryCard {
            title: "All Orders".to_string(),
            note: None,
            value: order_count.to_string(),
            link_label: "View Orders".to_string(),
            link_target: ORDERS_PATH.to_string(),
        },
        SummaryCard {
            title: "All Products".to_string(),
            note: None,
            value: product_count.to_string(),
            link_label: "View Products".to_string(),
            link_target: PRODUCTS_PATH.to_string(),
        },
    ]
}

// =============================================================================
// Dashboard Summary
// =============================================================================

/// Every derived view of the dashboard, rebuilt from scratch per snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub cards: Vec<SummaryCard>,
    pub orders: OrderTable,
    pub status_histogram: Histogram,
    pub status_chart: ChartData,
    pub stock_histogram: Histogram,
    pub stock_chart: ChartData,
    pub balance: BalanceSplit,
    pub balance_chart: ChartData,
}

/// Builds the whole dashboard from one snapshot.
pub fn build_dashboard_summary(snapshot: &DashboardSnapshot, settings: &DashboardSettings) -> DashboardSummary {
    let orders = snapshot.orders.as_deref();
    let products = snapshot.products.as_deref();

    let status_histogram = build_status_histogram(orders);
    let stock_histogram = build_stock_histogram(products);
    let balance = build_balance_split(
        snapshot
            .seller
            .as_ref()
            .and_then(|seller| seller.available_balance)
            .unwrap_or(0.0),
    );

    DashboardSummary {
        cards: build_summary_cards(snapshot, &settings.currency),
        orders: OrderTable::new(build_order_rows(orders, &settings.currency), settings.page_size),
        status_chart: build_status_chart(&status_histogram),
        status_histogram,
        stock_chart: build_stock_chart(&stock_histogram),
        stock_histogram,
        balance_chart: build_balance_chart(&balance),
        balance,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
