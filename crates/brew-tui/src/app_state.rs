//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this for store state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::path::PathBuf;

use brew_proto::protocol::StoreSnapshot;

use crate::banner::{compute_banner, Banner};
use crate::intent::{FavoriteIntents, RenderHint};
use crate::view_state::{select_view_state, ViewState};
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Store ───────────────────────────────────────────────────────────────
    pub snapshot: StoreSnapshot,
    /// Derived from `snapshot` whenever it changes.
    pub view: ViewState,
    pub banner: Banner,

    // ── Ephemeral UI flags ──────────────────────────────────────────────────
    pub show_debug: bool,
    pub show_search: bool,
    pub show_keys: bool,
    pub input_mode: InputMode,

    // ── Pending favorite toggles ────────────────────────────────────────────
    pub favorite_intents: FavoriteIntents,

    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(show_search: bool, show_debug: bool, log_path: PathBuf) -> Self {
        let snapshot = StoreSnapshot::default();
        let view = select_view_state(&snapshot);
        let banner = compute_banner(&snapshot.status, show_debug);
        Self {
            snapshot,
            view,
            banner,
            show_debug,
            show_search,
            show_keys: true,
            input_mode: InputMode::Normal,
            favorite_intents: FavoriteIntents::new(),
            log_path,
        }
    }

    /// Replace the snapshot and re-run the projections.
    pub fn apply_snapshot(&mut self, snapshot: StoreSnapshot) {
        self.favorite_intents.on_snapshot(&snapshot);
        self.snapshot = snapshot;
        self.view = select_view_state(&self.snapshot);
        self.banner = compute_banner(&self.snapshot.status, self.show_debug);
    }

    pub fn set_debug(&mut self, on: bool) {
        self.show_debug = on;
        self.banner = compute_banner(&self.snapshot.status, on);
    }

    /// True when a category or favorites-only chip should be shown.
    pub fn has_chip_filters(&self) -> bool {
        let f = &self.snapshot.filter;
        f.selected_category.is_some() || f.favorites_only
    }

    pub fn favorite_hint(&self, id: &str) -> RenderHint {
        self.favorite_intents.hint(id)
    }
}
