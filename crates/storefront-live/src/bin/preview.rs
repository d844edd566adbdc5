//! # Storefront Preview
//!
//! Renders the dashboard for a snapshot file and runs the hero banner for a
//! few frames, printing everything to stdout.
//!
//! ## Usage
//! ```bash
//! # Default config, empty dashboard, 3 banner frames
//! cargo run -p storefront-live --bin preview
//!
//! # Dashboard from a JSON snapshot
//! cargo run -p storefront-live --bin preview -- --snapshot ./snapshot.json
//!
//! # Custom config and more frames
//! cargo run -p storefront-live --bin preview -- --config ./storefront.toml --ticks 6
//! ```
//!
//! The snapshot file has the shape
//! `{ "orders": [...], "products": [...], "seller": {...} }`; any part may
//! be missing.

use std::env;
use std::path::PathBuf;

use storefront_core::DashboardSnapshot;
use storefront_live::{BannerService, DashboardFeed, StorefrontConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

fn print_help() {
    println!("Storefront Preview");
    println!();
    println!("Usage: preview [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>    Config file (default: platform config dir)");
    println!("  -s, --snapshot <PATH>  Dashboard snapshot JSON (default: empty dashboard)");
    println!("  -t, --ticks <N>        Banner frames to show (default: 3)");
    println!("  -h, --help             Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut snapshot_path: Option<PathBuf> = None;
    let mut ticks: usize = 3;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--ticks" | "-t" => {
                if i + 1 < args.len() {
                    ticks = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                return Ok(());
            }
        }
        i += 1;
    }

    init_tracing();

    let config = StorefrontConfig::load(config_path)?;

    // Dashboard
    let snapshot = match snapshot_path {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)?;
            DashboardSnapshot::from_json(&serde_json::from_str(&contents)?)
        }
        None => DashboardSnapshot::default(),
    };

    let feed = DashboardFeed::from_config(&config).start();
    let mut views = feed.subscribe();
    let replaced = snapshot != DashboardSnapshot::default();
    feed.replace_snapshot(snapshot).await?;
    if replaced {
        views.changed().await?;
    }

    let view = feed.current();
    println!("Dashboard (revision {})", view.revision);
    println!("==========================");
    for card in &view.summary.cards {
        println!("{:<22} {:>14}   {} -> {}", card.title, card.value, card.link_label, card.link_target);
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&view.summary)?);
    feed.shutdown().await?;

    // Banner
    let banner = BannerService::from_config(&config)?.start();
    let mut frames = banner.subscribe();

    println!();
    println!("Banner ({} ms per image)", config.banner.interval_ms);
    println!("==========================");
    println!("  [{}] {}", banner.frame().index, banner.current_image());
    for _ in 0..ticks {
        frames.changed().await?;
        let frame = frames.borrow_and_update().clone();
        println!("  [{}] {}", frame.index, frame.image);
    }

    banner.shutdown().await?;
    Ok(())
}
