//! RecipeStore: the view-model behind the recipe list screen.
//!
//! Owns the catalog, filter state, favorites and UI status behind a single
//! `RwLock`. Every mutation bumps `rev`; the owner of the store broadcasts a
//! change notification after each mutating call and listeners pull a fresh
//! `snapshot()`.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::catalog::{load_catalog, Catalog};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::protocol::{
    BeverageType, FilterState, RecipeSummary, Signal, StoreSnapshot, UiStatus,
};
use crate::query;

pub const DEFAULT_LOADING_MESSAGE: &str = "Loading ingredients…";

/// Favorite overrides saved between runs. Keys are recipe ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistentState {
    #[serde(default)]
    pub favorites: BTreeMap<String, bool>,
}

#[derive(Debug, Default)]
struct StoreInner {
    rev: u64,
    next_seq: u64,
    loaded_once: bool,
    catalog: Catalog,
    favorites: BTreeMap<String, bool>,
    filter: FilterState,
    status: UiStatus,
}

impl StoreInner {
    fn bump(&mut self) {
        self.rev += 1;
    }

    fn signal(&mut self, value: String) -> Signal<String> {
        self.next_seq += 1;
        Signal {
            seq: self.next_seq,
            value,
        }
    }

    /// Catalog recipes with persisted favorite overrides applied.
    fn recipes(&self) -> Vec<RecipeSummary> {
        self.catalog
            .recipes
            .iter()
            .map(|r| {
                let mut r = r.clone();
                if let Some(&fav) = self.favorites.get(&r.id) {
                    r.favorite = fav;
                }
                r
            })
            .collect()
    }
}

pub struct RecipeStore {
    inner: Arc<RwLock<StoreInner>>,
    catalog_file: PathBuf,
    state_file: PathBuf,
    recent_limit: usize,
}

impl RecipeStore {
    pub fn new(config: &StoreConfig) -> Self {
        let persistent = Self::load_persistent(&config.state_file);
        let inner = StoreInner {
            rev: 1,
            favorites: persistent.favorites,
            ..StoreInner::default()
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
            catalog_file: config.catalog_file.clone(),
            state_file: config.state_file.clone(),
            recent_limit: config.recent_limit,
        }
    }

    pub async fn rev(&self) -> u64 {
        self.inner.read().await.rev
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.read().await;
        let all = inner.recipes();
        let filter = inner.filter.clone();

        let mut status = inner.status.clone();
        status.has_ingredients = !inner.catalog.ingredients.is_empty();
        status.ingredient_count = inner.catalog.ingredients.len();
        status.recipe_stats = inner.loaded_once.then(|| query::recipe_stats(&all));

        StoreSnapshot {
            rev: inner.rev,
            status,
            recipes: query::filter_recipes(
                &all,
                &filter.search_query,
                filter.selected_category,
                filter.favorites_only,
            ),
            recent_recipes: query::recent_recipes(&all, self.recent_limit),
            ingredient_stats: query::ingredient_stats(&inner.catalog.ingredients),
            filter,
        }
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    pub async fn set_loading(&self, message: Option<String>) {
        let mut inner = self.inner.write().await;
        inner.status.is_loading = true;
        inner.status.initialization_message =
            Some(message.unwrap_or_else(|| DEFAULT_LOADING_MESSAGE.to_string()));
        inner.bump();
    }

    /// Read the catalog file without touching store state.
    pub async fn read_catalog(&self) -> StoreResult<Catalog> {
        load_catalog(&self.catalog_file).await
    }

    /// Finish a load started with `set_loading`. Recipes that appear on a
    /// reload (not the first load) raise a success message and point the
    /// navigation target at the first new one.
    pub async fn apply_catalog(&self, result: StoreResult<Catalog>) {
        let mut inner = self.inner.write().await;
        inner.status.is_loading = false;
        inner.status.initialization_message = None;

        match result {
            Ok(catalog) => {
                let known: HashSet<&str> =
                    inner.catalog.recipes.iter().map(|r| r.id.as_str()).collect();
                let added: Vec<String> = catalog
                    .recipes
                    .iter()
                    .filter(|r| !known.contains(r.id.as_str()))
                    .map(|r| r.id.clone())
                    .collect();
                let reload = inner.loaded_once;

                info!(
                    "catalog loaded: {} recipes, {} ingredients",
                    catalog.recipes.len(),
                    catalog.ingredients.len()
                );
                inner.catalog = catalog;
                inner.loaded_once = true;

                if reload && !added.is_empty() {
                    let msg = format!("Imported {} recipe(s)", added.len());
                    let success = inner.signal(msg);
                    inner.status.success_message = Some(success);
                    let nav = inner.signal(added[0].clone());
                    inner.status.navigation_target = Some(nav);
                }
            }
            Err(e) => {
                let err = inner.signal(format!("Failed to load catalog: {}", e));
                inner.status.error = Some(err);
            }
        }
        inner.bump();
    }

    /// Re-read only the ingredient tables.
    pub async fn check_ingredient_status(&self) {
        let result = self.read_catalog().await;
        let mut inner = self.inner.write().await;
        match result {
            Ok(catalog) => {
                let n = catalog.ingredients.len();
                inner.catalog.ingredients = catalog.ingredients;
                let success = inner.signal(format!("Found {} ingredients", n));
                inner.status.success_message = Some(success);
            }
            Err(e) => {
                let err = inner.signal(format!("Failed to load ingredients: {}", e));
                inner.status.error = Some(err);
            }
        }
        inner.bump();
    }

    // ── Filters ──────────────────────────────────────────────────────────────

    pub async fn update_search_query(&self, text: String) {
        let mut inner = self.inner.write().await;
        inner.filter.search_query = text;
        inner.bump();
    }

    pub async fn select_beverage_type(&self, category: Option<BeverageType>) {
        let mut inner = self.inner.write().await;
        inner.filter.selected_category = category;
        inner.bump();
    }

    pub async fn toggle_favorites_filter(&self) {
        let mut inner = self.inner.write().await;
        inner.filter.favorites_only = !inner.filter.favorites_only;
        inner.bump();
    }

    /// Reset category and favorites-only. The search text stays.
    pub async fn clear_filters(&self) {
        let mut inner = self.inner.write().await;
        inner.filter.selected_category = None;
        inner.filter.favorites_only = false;
        inner.bump();
    }

    // ── Favorites ────────────────────────────────────────────────────────────

    /// Flip and persist. A failed save restores the previous value so
    /// memory and disk agree.
    pub async fn toggle_favorite(&self, recipe_id: &str) -> StoreResult<bool> {
        let current = {
            let mut inner = self.inner.write().await;
            let current = inner
                .recipes()
                .into_iter()
                .find(|r| r.id == recipe_id)
                .map(|r| r.favorite)
                .ok_or_else(|| StoreError::UnknownRecipe(recipe_id.to_string()))?;
            inner.favorites.insert(recipe_id.to_string(), !current);
            inner.bump();
            current
        };
        if let Err(e) = self.save().await {
            warn!("favorite {} not saved, reverting: {}", recipe_id, e);
            let mut inner = self.inner.write().await;
            inner.favorites.insert(recipe_id.to_string(), current);
            inner.bump();
            return Err(e);
        }
        Ok(!current)
    }

    // ── One-shot signals ─────────────────────────────────────────────────────

    pub async fn push_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.write().await;
        let err = inner.signal(message.into());
        inner.status.error = Some(err);
        inner.bump();
    }

    /// Clear the error if it is still the emission `seq`. Returns whether
    /// anything was cleared.
    pub async fn clear_error(&self, seq: u64) -> bool {
        let mut inner = self.inner.write().await;
        let cleared = clear_if_current(&mut inner.status.error, seq);
        if cleared {
            inner.bump();
        }
        cleared
    }

    pub async fn clear_success_message(&self, seq: u64) -> bool {
        let mut inner = self.inner.write().await;
        let cleared = clear_if_current(&mut inner.status.success_message, seq);
        if cleared {
            inner.bump();
        }
        cleared
    }

    pub async fn clear_navigation_target(&self, seq: u64) -> bool {
        let mut inner = self.inner.write().await;
        let cleared = clear_if_current(&mut inner.status.navigation_target, seq);
        if cleared {
            inner.bump();
        }
        cleared
    }

    // ── Persistence ──────────────────────────────────────────────────────────

    async fn save(&self) -> StoreResult<()> {
        let persistent = {
            let inner = self.inner.read().await;
            PersistentState {
                favorites: inner.favorites.clone(),
            }
        };

        if let Some(parent) = self.state_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&persistent)?;
        tokio::fs::write(&self.state_file, json).await?;
        Ok(())
    }

    fn load_persistent(state_file: &Path) -> PersistentState {
        if let Ok(content) = std::fs::read_to_string(state_file) {
            if let Ok(persistent) = serde_json::from_str::<PersistentState>(&content) {
                return persistent;
            }
        }
        PersistentState::default()
    }
}

fn clear_if_current<T>(slot: &mut Option<Signal<T>>, seq: u64) -> bool {
    if slot.as_ref().map_or(false, |s| s.seq == seq) {
        *slot = None;
        true
    } else {
        false
    }
}
