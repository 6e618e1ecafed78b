//! StoreCore: single-owner event loop in front of the recipe store.
//!
//! The App sends `StoreEvent`s here; nothing else mutates the store. After
//! each event that changes store state, StoreCore broadcasts
//! `BroadcastMessage::StateUpdated` so the UI fetches a fresh snapshot.
//! Command failures become the store's error signal and never end the loop.
use std::sync::Arc;

use brew_proto::protocol::Command;
use brew_proto::state::RecipeStore;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info};

use crate::BroadcastMessage;

// ── StoreEvent ────────────────────────────────────────────────────────────────

/// All inputs into the StoreCore loop.
#[derive(Debug)]
pub enum StoreEvent {
    /// A command from the UI.
    Command(Command),
    /// Shutdown requested.
    Shutdown,
}

// ── StoreCore ─────────────────────────────────────────────────────────────────

pub struct StoreCore {
    store: Arc<RecipeStore>,
    broadcast_tx: broadcast::Sender<BroadcastMessage>,
}

impl StoreCore {
    pub fn new(store: RecipeStore, broadcast_tx: broadcast::Sender<BroadcastMessage>) -> Self {
        Self {
            store: Arc::new(store),
            broadcast_tx,
        }
    }

    /// Shared read handle for snapshot fetching.
    pub fn store(&self) -> Arc<RecipeStore> {
        Arc::clone(&self.store)
    }

    /// Run the event loop. Performs the initial catalog load first, then
    /// returns on `Shutdown` or when the event channel closes.
    pub async fn run(self, mut event_rx: mpsc::Receiver<StoreEvent>) -> anyhow::Result<()> {
        info!("StoreCore: starting event loop");
        self.handle_command(Command::ForceInitialization).await;

        while let Some(evt) = event_rx.recv().await {
            match evt {
                StoreEvent::Shutdown => {
                    info!("StoreCore: shutdown requested");
                    return Ok(());
                }
                StoreEvent::Command(cmd) => {
                    self.handle_command(cmd).await;
                }
            }
        }
        info!("StoreCore: event channel closed, shutting down");
        Ok(())
    }

    fn notify(&self) {
        // No receivers just means the UI has gone; the loop ends with the channel.
        let _ = self.broadcast_tx.send(BroadcastMessage::StateUpdated);
    }

    fn log(&self, line: String) {
        let _ = self.broadcast_tx.send(BroadcastMessage::Log(line));
    }

    pub async fn handle_command(&self, cmd: Command) {
        match &cmd {
            Command::UpdateSearchQuery { .. } => debug!("StoreCore: command {:?}", cmd),
            _ => info!("StoreCore: command {:?}", cmd),
        }
        let before = self.store.rev().await;
        let store = &self.store;

        match cmd {
            Command::ForceInitialization => {
                store.set_loading(None).await;
                // Show the loading state before the read completes.
                self.notify();
                let result = store.read_catalog().await;
                store.apply_catalog(result).await;
            }
            Command::CheckIngredientStatus => store.check_ingredient_status().await,
            Command::ToggleFavoritesFilter => store.toggle_favorites_filter().await,
            Command::UpdateSearchQuery { text } => store.update_search_query(text).await,
            Command::SelectBeverageType { category } => {
                store.select_beverage_type(category).await
            }
            Command::ClearFilters => store.clear_filters().await,
            Command::ToggleFavorite { recipe_id } => {
                match store.toggle_favorite(&recipe_id).await {
                    Ok(now) => self.log(format!(
                        "{} {} favorites",
                        recipe_id,
                        if now { "added to" } else { "removed from" }
                    )),
                    Err(e) => {
                        error!("StoreCore: toggle favorite {}: {}", recipe_id, e);
                        store.push_error(e.to_string()).await;
                    }
                }
            }
            Command::ClearNavigationTarget { seq } => {
                store.clear_navigation_target(seq).await;
            }
            Command::ClearSuccessMessage { seq } => {
                store.clear_success_message(seq).await;
            }
            Command::ClearError { seq } => {
                store.clear_error(seq).await;
            }
        }

        if store.rev().await != before {
            self.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::config::StoreConfig;

    const CATALOG: &str = r#"
[[recipe]]
id = "cyser"
name = "Cyser"
beverage_type = "mead"

[[ingredient]]
name = "Wildflower honey"
category = "honey"
"#;

    fn core_in(dir: &std::path::Path) -> (StoreCore, broadcast::Receiver<BroadcastMessage>) {
        let catalog_file = dir.join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let config = StoreConfig {
            catalog_file,
            state_file: dir.join("state.json"),
            recent_limit: 5,
        };
        let (tx, rx) = broadcast::channel(64);
        (StoreCore::new(RecipeStore::new(&config), tx), rx)
    }

    fn drain(rx: &mut broadcast::Receiver<BroadcastMessage>) -> usize {
        let mut n = 0;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, BroadcastMessage::StateUpdated) {
                n += 1;
            }
        }
        n
    }

    #[tokio::test]
    async fn force_initialization_broadcasts_loading_then_result() {
        let dir = tempfile::tempdir().unwrap();
        let (core, mut rx) = core_in(dir.path());
        core.handle_command(Command::ForceInitialization).await;
        assert_eq!(drain(&mut rx), 2);

        let snap = core.store().snapshot().await;
        assert!(!snap.status.is_loading);
        assert_eq!(snap.recipes.len(), 1);
    }

    #[tokio::test]
    async fn stale_ack_does_not_broadcast() {
        let dir = tempfile::tempdir().unwrap();
        let (core, mut rx) = core_in(dir.path());
        core.handle_command(Command::ForceInitialization).await;
        drain(&mut rx);

        core.handle_command(Command::ClearError { seq: 99 }).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test]
    async fn unknown_favorite_becomes_error_signal() {
        let dir = tempfile::tempdir().unwrap();
        let (core, mut rx) = core_in(dir.path());
        core.handle_command(Command::ForceInitialization).await;
        drain(&mut rx);

        core.handle_command(Command::ToggleFavorite {
            recipe_id: "missing".into(),
        })
        .await;
        assert_eq!(drain(&mut rx), 1);
        let err = core.store().snapshot().await.status.error.unwrap();
        assert_eq!(err.value, "Recipe not found: missing");
    }

    #[tokio::test]
    async fn failed_save_becomes_error_signal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_file = dir.path().join("catalog.toml");
        std::fs::write(&catalog_file, CATALOG).unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = StoreConfig {
            catalog_file,
            state_file: blocker.join("state.json"),
            recent_limit: 5,
        };
        let (tx, mut rx) = broadcast::channel(64);
        let core = StoreCore::new(RecipeStore::new(&config), tx);
        core.handle_command(Command::ForceInitialization).await;
        drain(&mut rx);

        core.handle_command(Command::ToggleFavorite {
            recipe_id: "cyser".into(),
        })
        .await;
        assert_eq!(drain(&mut rx), 1);
        let snap = core.store().snapshot().await;
        let err = snap.status.error.as_ref().unwrap();
        assert!(err.value.starts_with("cannot persist state"), "{}", err.value);
        assert!(!snap.recipe("cyser").unwrap().favorite);
    }
}
