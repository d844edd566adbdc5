//! # Banner Service
//!
//! Drives the hero banner rotation on a Tokio interval and publishes every
//! frame to subscribers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Banner Service                                  │
//! │                                                                         │
//! │   BannerHandle                          banner task (one per list)      │
//! │   ────────────                          ──────────────────────────      │
//! │   replace_images(list) ──── cmd ───────► reset Rotation + interval      │
//! │   shutdown()           ──── cmd ───────► Stopped, task ends             │
//! │   (handle dropped)     ── channel closed► Stopped, task ends            │
//! │                                                                         │
//! │                                          interval.tick() every 5s       │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │   current_image() / subscribe() ◄── watch ── Rotation::tick()          │
//! │                                                                         │
//! │  • The interval is created ONCE when the task starts                    │
//! │  • Ticks never restart the timer; only a new image list resets it      │
//! │  • The index is only ever touched inside the task                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use storefront_core::{BannerFrame, CallToAction, ImageList, Rotation};

use crate::config::StorefrontConfig;
use crate::error::{LiveError, LiveResult};

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug)]
enum BannerCommand {
    /// Swap the image list; rotation restarts at the first image.
    ReplaceImages(ImageList),
    /// Stop rotating and end the task.
    Shutdown,
}

// =============================================================================
// Banner Service
// =============================================================================

/// A banner rotation waiting to be started.
pub struct BannerService {
    rotation: Rotation,
    period: Duration,
    call_to_action: CallToAction,
}

impl BannerService {
    /// Creates a banner rotating through `images` every `period`.
    pub fn new(images: ImageList, period: Duration, call_to_action: CallToAction) -> Self {
        BannerService {
            rotation: Rotation::new(images),
            period,
            call_to_action,
        }
    }

    /// Builds the banner from validated configuration.
    pub fn from_config(config: &StorefrontConfig) -> LiveResult<Self> {
        Ok(Self::new(
            config.image_list()?,
            config.banner_interval(),
            config.call_to_action(),
        ))
    }

    /// Spawns the rotation task and returns its handle.
    ///
    /// The first frame (first image) is available immediately; the first
    /// tick happens one full period later.
    pub fn start(self) -> BannerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (frame_tx, frame_rx) = watch::channel(self.rotation.frame(&self.call_to_action));

        let task = tokio::spawn(async move {
            self.run(cmd_rx, frame_tx).await;
        });

        BannerHandle {
            cmd_tx,
            frame_rx,
            task,
        }
    }

    /// Main rotation loop.
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<BannerCommand>, frame_tx: watch::Sender<BannerFrame>) {
        info!(
            images = self.rotation.images().len(),
            period_ms = self.period.as_millis() as u64,
            "Banner rotation started"
        );

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(BannerCommand::ReplaceImages(images)) => {
                            info!(images = images.len(), "Banner image list replaced");
                            self.rotation = Rotation::new(images);
                            ticker.reset();
                            frame_tx.send_replace(self.rotation.frame(&self.call_to_action));
                        }
                        Some(BannerCommand::Shutdown) | None => {
                            self.rotation.stop();
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    if let Some(index) = self.rotation.tick() {
                        debug!(index, image = %self.rotation.current_image(), "Banner advanced");
                        frame_tx.send_replace(self.rotation.frame(&self.call_to_action));
                    }
                }
            }
        }

        info!("Banner rotation stopped");
    }
}

// =============================================================================
// Banner Handle
// =============================================================================

/// Owner of a running banner.
///
/// Dropping the handle stops the rotation: the command channel closes and
/// the task ends, releasing its timer.
pub struct BannerHandle {
    cmd_tx: mpsc::Sender<BannerCommand>,
    frame_rx: watch::Receiver<BannerFrame>,
    task: JoinHandle<()>,
}

impl BannerHandle {
    /// The image to render right now.
    pub fn current_image(&self) -> String {
        self.frame_rx.borrow().image.clone()
    }

    /// The full current frame (index, image, call to action).
    pub fn frame(&self) -> BannerFrame {
        self.frame_rx.borrow().clone()
    }

    /// A receiver notified on every published frame.
    ///
    /// `changed()` returns an error once the banner has stopped.
    pub fn subscribe(&self) -> watch::Receiver<BannerFrame> {
        self.frame_rx.clone()
    }

    /// Replaces the image list; rotation and timer restart from the first
    /// image.
    pub async fn replace_images(&self, images: ImageList) -> LiveResult<()> {
        self.cmd_tx
            .send(BannerCommand::ReplaceImages(images))
            .await
            .map_err(|_| LiveError::ShuttingDown("Banner"))
    }

    /// Stops the rotation and waits for the task to finish.
    pub async fn shutdown(self) -> LiveResult<()> {
        // An error here means the task already ended.
        let _ = self.cmd_tx.send(BannerCommand::Shutdown).await;
        self.task
            .await
            .map_err(|e| LiveError::ChannelError(format!("Banner task failed: {e}")))
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    fn images(names: &[&str]) -> ImageList {
        ImageList::new(
            names
                .iter()
                .map(|n| format!("https://cdn.example.com/{n}.png"))
                .collect(),
        )
        .unwrap()
    }

    fn start(names: &[&str]) -> BannerHandle {
        BannerService::new(images(names), PERIOD, CallToAction::default()).start()
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_frame_is_first_image() {
        let banner = start(&["a", "b", "c"]);

        assert_eq!(banner.current_image(), "https://cdn.example.com/a.png");
        assert_eq!(banner.frame().index, 0);
        assert_eq!(banner.frame().call_to_action.target, "/products");

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_period() {
        let banner = start(&["a", "b"]);
        let mut rx = banner.subscribe();

        let early = tokio::time::timeout(PERIOD - Duration::from_millis(1), rx.changed()).await;
        assert!(early.is_err(), "frame changed before the first period elapsed");
        assert_eq!(banner.frame().index, 0);

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_advance_and_wrap() {
        let banner = start(&["a", "b", "c"]);
        let mut rx = banner.subscribe();
        let started = Instant::now();

        let mut seen = Vec::new();
        for _ in 0..3 {
            rx.changed().await.unwrap();
            let frame = rx.borrow_and_update().clone();
            seen.push((frame.index, frame.image));
        }

        assert_eq!(
            seen,
            vec![
                (1, "https://cdn.example.com/b.png".to_string()),
                (2, "https://cdn.example.com/c.png".to_string()),
                (0, "https://cdn.example.com/a.png".to_string()),
            ]
        );
        assert_eq!(started.elapsed(), PERIOD * 3);

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_displayed_image_matches_index() {
        let banner = start(&["a", "b", "c"]);
        let mut rx = banner.subscribe();

        rx.changed().await.unwrap();
        let frame = rx.borrow_and_update().clone();
        assert_eq!(frame.index, 1);
        assert_eq!(frame.image, "https://cdn.example.com/b.png");
        assert_eq!(banner.current_image(), frame.image);

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_images_restarts_rotation() {
        let banner = start(&["a", "b", "c"]);
        let mut rx = banner.subscribe();

        rx.changed().await.unwrap();
        let _ = rx.borrow_and_update();
        assert_eq!(banner.frame().index, 1);

        banner.replace_images(images(&["x", "y"])).await.unwrap();
        rx.changed().await.unwrap();
        let frame = rx.borrow_and_update().clone();
        assert_eq!(frame.index, 0);
        assert_eq!(frame.image, "https://cdn.example.com/x.png");

        let replaced_at = Instant::now();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().image, "https://cdn.example.com/y.png");
        assert_eq!(replaced_at.elapsed(), PERIOD);

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_releases_task() {
        let banner = start(&["a", "b"]);
        let mut rx = banner.subscribe();

        banner.shutdown().await.unwrap();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_rotation() {
        let banner = start(&["a", "b"]);
        let mut rx = banner.subscribe();
        drop(banner);

        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_image_keeps_publishing() {
        let banner = start(&["only"]);
        let mut rx = banner.subscribe();

        for _ in 0..2 {
            rx.changed().await.unwrap();
            let frame = rx.borrow_and_update().clone();
            assert_eq!(frame.index, 0);
            assert_eq!(frame.image, "https://cdn.example.com/only.png");
        }
        assert!(banner.is_running());

        banner.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config() {
        let mut config = StorefrontConfig::default();
        config.banner.images = vec!["/hero-1.png".to_string(), "/hero-2.png".to_string()];
        config.banner.interval_ms = 1000;

        let banner = BannerService::from_config(&config).unwrap().start();
        let mut rx = banner.subscribe();
        let started = Instant::now();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().image, "/hero-2.png");
        assert_eq!(started.elapsed(), Duration::from_millis(1000));

        banner.shutdown().await.unwrap();
    }

    #[test]
    fn test_from_config_rejects_empty_list() {
        let mut config = StorefrontConfig::default();
        config.banner.images.clear();

        let result = BannerService::from_config(&config);
        assert!(matches!(
            result,
            Err(LiveError::Core(storefront_core::CoreError::EmptyImageList))
        ));
    }
}
