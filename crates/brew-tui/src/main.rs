mod action;
mod app;
mod app_state;
mod banner;
mod component;
mod components;
mod core;
mod focus;
mod intent;
mod navigation;
mod signals;
mod theme;
mod view_state;
mod widgets;

use brew_proto::config::Config;
use brew_proto::state::RecipeStore;
use tokio::sync::{broadcast, mpsc};

/// What the StoreCore broadcasts to the UI.
#[derive(Debug, Clone)]
pub enum BroadcastMessage {
    /// Store state changed; receivers should fetch a fresh snapshot.
    StateUpdated,
    /// A log line from the store loop.
    Log(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = brew_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("brewlog.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so it can be tailed immediately.
    eprintln!("brewlog log: {}", log_path.display());

    tracing::info!("brewlog starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("config unreadable, using defaults: {}", e);
            Config::default()
        }
    };

    // Seed the catalog on first run from beside-exe (or data/ subdir) for bundled packages.
    let catalog_file = &config.store.catalog_file;
    if !catalog_file.exists() {
        if let Some(dir) = brew_proto::platform::exe_dir() {
            let candidates = [dir.join("catalog.toml"), dir.join("data").join("catalog.toml")];
            for seed in &candidates {
                if seed.exists() {
                    if let Some(parent) = catalog_file.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    if let Err(e) = std::fs::copy(seed, catalog_file) {
                        tracing::warn!("could not seed catalog from {}: {}", seed.display(), e);
                    }
                    break;
                }
            }
        }
    }

    // ── Broadcast channel (StoreCore → TUI) ─────────────────────────────────
    let (broadcast_tx, broadcast_rx) = broadcast::channel::<BroadcastMessage>(1024);

    // ── StoreEvent channel (TUI → StoreCore) ────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel::<core::StoreEvent>(1024);

    let store_core = core::StoreCore::new(RecipeStore::new(&config.store), broadcast_tx);
    let store = store_core.store();

    // ── Spawn StoreCore event loop ───────────────────────────────────────────
    tokio::spawn(async move {
        if let Err(e) = store_core.run(event_rx).await {
            tracing::error!("StoreCore exited with error: {}", e);
        }
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config.ui, store, event_tx, log_path);
    app.run(broadcast_rx).await?;

    Ok(())
}
