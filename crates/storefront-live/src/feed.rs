//! # Dashboard Feed
//!
//! Holds the latest orders, products and seller for the dashboard and
//! republishes the derived [`DashboardSummary`] whenever one of them changes.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dashboard Feed                                  │
//! │                                                                         │
//! │  set_orders / set_products / set_seller / replace_snapshot              │
//! │        │                                                                │
//! │        ▼ cmd (mpsc)                                                     │
//! │  ┌───────────────┐   unchanged? ──► ignore                              │
//! │  │ feed task     │                                                      │
//! │  │ (snapshot)    │── new seller id ──► FetchRequest ──► fetcher (opt)   │
//! │  └──────┬────────┘                                                      │
//! │         │ build_dashboard_summary()                                     │
//! │         ▼                                                               │
//! │  DashboardView { revision, published_at, summary }                      │
//! │         ├──► DashboardObserver::on_summary()                            │
//! │         └──► watch channel ──► current() / subscribe()                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use ts_rs::TS;

use storefront_core::dashboard::build_dashboard_summary;
use storefront_core::{DashboardSettings, DashboardSnapshot, DashboardSummary, OrderRecord, ProductRecord, Seller};

use crate::config::StorefrontConfig;
use crate::error::{LiveError, LiveResult};

// =============================================================================
// Published Types
// =============================================================================

/// One published state of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Incremented on every publish; 0 is the empty initial view.
    pub revision: u64,
    #[ts(as = "String")]
    pub published_at: DateTime<Utc>,
    pub summary: DashboardSummary,
}

/// Asks the data layer to load orders and products for a seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seller_id: String,
}

// =============================================================================
// Observer Trait
// =============================================================================

/// Receives every published dashboard view.
///
/// Called from inside the feed task, so implementations must not block.
pub trait DashboardObserver: Send + Sync {
    fn on_summary(&self, view: &DashboardView);
}

/// Observer that ignores every view.
pub struct NoOpObserver;

impl DashboardObserver for NoOpObserver {
    fn on_summary(&self, _view: &DashboardView) {}
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug)]
enum FeedCommand {
    SetSeller(Option<Seller>),
    SetOrders(Option<Vec<OrderRecord>>),
    SetProducts(Option<Vec<ProductRecord>>),
    ReplaceSnapshot(DashboardSnapshot),
    Shutdown,
}

// =============================================================================
// Dashboard Feed
// =============================================================================

/// Dashboard state waiting to be started.
pub struct DashboardFeed {
    settings: DashboardSettings,
    observer: Arc<dyn DashboardObserver>,
    fetch_tx: Option<mpsc::Sender<FetchRequest>>,
    snapshot: DashboardSnapshot,
    revision: u64,
}

impl DashboardFeed {
    /// Creates a feed with no observer and no fetcher.
    pub fn new(settings: DashboardSettings) -> Self {
        Self::with_observer(settings, Arc::new(NoOpObserver))
    }

    /// Creates a feed reporting every view to `observer`.
    pub fn with_observer(settings: DashboardSettings, observer: Arc<dyn DashboardObserver>) -> Self {
        DashboardFeed {
            settings,
            observer,
            fetch_tx: None,
            snapshot: DashboardSnapshot::default(),
            revision: 0,
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.dashboard_settings())
    }

    /// Sends a [`FetchRequest`] to `fetch_tx` whenever the seller id changes.
    pub fn with_fetcher(mut self, fetch_tx: mpsc::Sender<FetchRequest>) -> Self {
        self.fetch_tx = Some(fetch_tx);
        self
    }

    /// Spawns the feed task and returns its handle.
    pub fn start(self) -> DashboardFeedHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (view_tx, view_rx) = watch::channel(Arc::new(self.view()));

        tokio::spawn(async move {
            self.run(cmd_rx, view_tx).await;
        });

        DashboardFeedHandle { cmd_tx, view_rx }
    }

    async fn run(mut self, mut cmd_rx: mpsc::Receiver<FeedCommand>, view_tx: watch::Sender<Arc<DashboardView>>) {
        info!(page_size = self.settings.page_size, "Dashboard feed started");

        while let Some(cmd) = cmd_rx.recv().await {
            let next = match cmd {
                FeedCommand::SetSeller(seller) => DashboardSnapshot {
                    seller,
                    ..self.snapshot.clone()
                },
                FeedCommand::SetOrders(orders) => DashboardSnapshot {
                    orders,
                    ..self.snapshot.clone()
                },
                FeedCommand::SetProducts(products) => DashboardSnapshot {
                    products,
                    ..self.snapshot.clone()
                },
                FeedCommand::ReplaceSnapshot(snapshot) => snapshot,
                FeedCommand::Shutdown => break,
            };

            if next == self.snapshot {
                debug!("Dashboard input unchanged");
                continue;
            }

            let seller_changed = next.seller_id() != self.snapshot.seller_id();
            self.snapshot = next;

            if seller_changed {
                self.request_fetch();
            }

            self.revision += 1;
            let view = self.view();
            debug!(
                revision = view.revision,
                orders = view.summary.orders.rows.len(),
                statuses = view.summary.status_histogram.len(),
                "Dashboard recomputed"
            );
            self.observer.on_summary(&view);
            view_tx.send_replace(Arc::new(view));
        }

        info!("Dashboard feed stopped");
    }

    fn view(&self) -> DashboardView {
        DashboardView {
            revision: self.revision,
            published_at: Utc::now(),
            summary: build_dashboard_summary(&self.snapshot, &self.settings),
        }
    }

    fn request_fetch(&self) {
        let (Some(fetch_tx), Some(seller_id)) = (&self.fetch_tx, self.snapshot.seller_id()) else {
            return;
        };

        info!(seller_id, "Requesting dashboard data");
        let request = FetchRequest {
            seller_id: seller_id.to_string(),
        };
        if let Err(e) = fetch_tx.try_send(request) {
            warn!(seller_id, error = %e, "Dropped dashboard fetch request");
        }
    }
}

// =============================================================================
// Feed Handle
// =============================================================================

/// Handle for pushing inputs into a running feed.
///
/// The task ends after [`shutdown`](Self::shutdown) or when every clone of
/// the handle is dropped.
#[derive(Clone)]
pub struct DashboardFeedHandle {
    cmd_tx: mpsc::Sender<FeedCommand>,
    view_rx: watch::Receiver<Arc<DashboardView>>,
}

impl DashboardFeedHandle {
    pub async fn set_seller(&self, seller: Option<Seller>) -> LiveResult<()> {
        self.send(FeedCommand::SetSeller(seller)).await
    }

    pub async fn set_orders(&self, orders: Option<Vec<OrderRecord>>) -> LiveResult<()> {
        self.send(FeedCommand::SetOrders(orders)).await
    }

    pub async fn set_products(&self, products: Option<Vec<ProductRecord>>) -> LiveResult<()> {
        self.send(FeedCommand::SetProducts(products)).await
    }

    /// Replaces all three inputs at once, publishing at most one view.
    pub async fn replace_snapshot(&self, snapshot: DashboardSnapshot) -> LiveResult<()> {
        self.send(FeedCommand::ReplaceSnapshot(snapshot)).await
    }

    /// The most recently published view.
    pub fn current(&self) -> Arc<DashboardView> {
        self.view_rx.borrow().clone()
    }

    /// A receiver notified on every published view.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardView>> {
        self.view_rx.clone()
    }

    pub async fn shutdown(&self) -> LiveResult<()> {
        self.send(FeedCommand::Shutdown).await
    }

    async fn send(&self, cmd: FeedCommand) -> LiveResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| LiveError::ShuttingDown("Dashboard feed"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use storefront_core::CartEntry;

    use super::*;

    fn order(id: &str, qty: i64, total: f64, status: &str) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            cart: Some(vec![CartEntry { qty: Some(qty) }]),
            total_price: Some(total),
            status: Some(status.to_string()),
        }
    }

    fn product(in_stock: bool) -> ProductRecord {
        ProductRecord {
            in_stock,
            ..Default::default()
        }
    }

    fn seller(id: &str, balance: f64) -> Seller {
        Seller {
            id: Some(id.to_string()),
            available_balance: Some(balance),
            ..Default::default()
        }
    }

    async fn next_view(rx: &mut watch::Receiver<Arc<DashboardView>>) -> Arc<DashboardView> {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    }

    #[derive(Default)]
    struct RecordingObserver {
        revisions: Mutex<Vec<u64>>,
    }

    impl DashboardObserver for RecordingObserver {
        fn on_summary(&self, view: &DashboardView) {
            self.revisions.lock().unwrap().push(view.revision);
        }
    }

    #[tokio::test]
    async fn test_initial_view_is_empty() {
        let feed = DashboardFeed::new(DashboardSettings::default()).start();
        let view = feed.current();

        assert_eq!(view.revision, 0);
        assert!(view.summary.orders.rows.is_empty());
        assert!(view.summary.status_histogram.is_empty());
        assert!(view.summary.stock_histogram.is_empty());
        assert_eq!(view.summary.balance.as_array(), [0.0, 100.0]);

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_orders_recompute_summary() {
        let feed = DashboardFeed::new(DashboardSettings::default()).start();
        let mut rx = feed.subscribe();

        feed.set_orders(Some(vec![
            order("o1", 2, 1500.0, "Processing"),
            order("o2", 1, 200.0, "Delivered"),
            order("o3", 4, 50.0, "Processing"),
        ]))
        .await
        .unwrap();

        let view = next_view(&mut rx).await;
        assert_eq!(view.revision, 1);
        assert_eq!(view.summary.orders.rows.len(), 3);
        assert_eq!(view.summary.orders.rows[0].total, "1.500đ");
        assert_eq!(view.summary.status_histogram.get("Processing"), 2);
        assert_eq!(view.summary.status_histogram.get("Delivered"), 1);
        assert_eq!(feed.current().revision, 1);

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_unchanged_input_is_not_republished() {
        let feed = DashboardFeed::new(DashboardSettings::default()).start();
        let mut rx = feed.subscribe();
        let orders = vec![order("o1", 1, 10.0, "Delivered")];

        feed.set_orders(Some(orders.clone())).await.unwrap();
        feed.set_orders(Some(orders)).await.unwrap();
        feed.set_products(Some(vec![product(true)])).await.unwrap();

        let view = loop {
            let view = next_view(&mut rx).await;
            if !view.summary.stock_histogram.is_empty() {
                break view;
            }
        };
        assert_eq!(view.revision, 2);

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_seller_change_requests_fetch() {
        let (fetch_tx, mut fetch_rx) = mpsc::channel(8);
        let feed = DashboardFeed::new(DashboardSettings::default())
            .with_fetcher(fetch_tx)
            .start();
        let mut rx = feed.subscribe();

        feed.set_seller(Some(seller("shop-1", 30.0))).await.unwrap();
        let view = next_view(&mut rx).await;
        assert_eq!(view.summary.balance.as_array(), [30.0, 70.0]);
        assert_eq!(
            fetch_rx.recv().await,
            Some(FetchRequest {
                seller_id: "shop-1".into()
            })
        );

        // Same seller, new balance: recompute without refetching.
        feed.set_seller(Some(seller("shop-1", 45.0))).await.unwrap();
        next_view(&mut rx).await;
        assert!(fetch_rx.try_recv().is_err());

        feed.set_seller(None).await.unwrap();
        next_view(&mut rx).await;
        assert!(fetch_rx.try_recv().is_err());

        feed.set_seller(Some(seller("shop-2", 0.0))).await.unwrap();
        next_view(&mut rx).await;
        assert_eq!(fetch_rx.try_recv().unwrap().seller_id, "shop-2");

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_observer_sees_every_view() {
        let observer = Arc::new(RecordingObserver::default());
        let feed = DashboardFeed::with_observer(DashboardSettings::default(), observer.clone()).start();
        let mut rx = feed.subscribe();

        feed.set_products(Some(vec![product(true), product(false)])).await.unwrap();
        next_view(&mut rx).await;
        feed.set_orders(Some(vec![order("o1", 1, 1.0, "Delivered")])).await.unwrap();
        next_view(&mut rx).await;

        assert_eq!(*observer.revisions.lock().unwrap(), vec![1, 2]);

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_replace_snapshot_publishes_once() {
        let observer = Arc::new(RecordingObserver::default());
        let feed = DashboardFeed::with_observer(DashboardSettings::default(), observer.clone()).start();
        let mut rx = feed.subscribe();

        feed.replace_snapshot(DashboardSnapshot {
            orders: Some(vec![order("o1", 3, 99.5, "Shipping")]),
            products: Some(vec![product(false)]),
            seller: Some(seller("shop-1", 150.0)),
        })
        .await
        .unwrap();

        let view = next_view(&mut rx).await;
        assert_eq!(view.revision, 1);
        assert_eq!(view.summary.orders.rows[0].total, "99,5đ");
        assert_eq!(view.summary.stock_histogram.get("Out of Stock"), 1);
        assert!(view.summary.balance.is_out_of_range());
        assert_eq!(*observer.revisions.lock().unwrap(), vec![1]);

        feed.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_push_after_shutdown_fails() {
        let feed = DashboardFeed::new(DashboardSettings::default()).start();
        let mut rx = feed.subscribe();

        feed.shutdown().await.unwrap();
        assert!(rx.changed().await.is_err());

        let result = feed.set_orders(None).await;
        assert!(matches!(result, Err(LiveError::ShuttingDown("Dashboard feed"))));
    }

    #[tokio::test]
    async fn test_from_config_uses_page_size() {
        let mut config = StorefrontConfig::default();
        config.dashboard.page_size = 2;

        let feed = DashboardFeed::from_config(&config).start();
        let mut rx = feed.subscribe();

        feed.set_orders(Some(
            (0..5).map(|i| order(&format!("o{i}"), 1, 1.0, "Delivered")).collect(),
        ))
        .await
        .unwrap();

        let view = next_view(&mut rx).await;
        assert_eq!(view.summary.orders.page_count(), 3);
        assert_eq!(view.summary.orders.page(2).len(), 1);

        feed.shutdown().await.unwrap();
    }
}
