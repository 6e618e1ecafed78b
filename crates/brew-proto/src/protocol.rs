use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Intents sent from the TUI to the recipe store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    /// Acknowledge the navigation signal with sequence `seq`.
    ClearNavigationTarget { seq: u64 },
    /// Acknowledge the success signal with sequence `seq`.
    ClearSuccessMessage { seq: u64 },
    /// Acknowledge the error signal with sequence `seq`.
    ClearError { seq: u64 },
    ForceInitialization,
    CheckIngredientStatus,
    ToggleFavoritesFilter,
    UpdateSearchQuery { text: String },
    SelectBeverageType { category: Option<BeverageType> },
    ClearFilters,
    ToggleFavorite { recipe_id: String },
}

/// Classification of a recipe, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeverageType {
    Mead,
    Beer,
    Wine,
    Cider,
    Kombucha,
    Other,
}

impl BeverageType {
    pub const ALL: [BeverageType; 6] = [
        BeverageType::Mead,
        BeverageType::Beer,
        BeverageType::Wine,
        BeverageType::Cider,
        BeverageType::Kombucha,
        BeverageType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mead => "Mead",
            Self::Beer => "Beer",
            Self::Wine => "Wine",
            Self::Cider => "Cider",
            Self::Kombucha => "Kombucha",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BeverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ingredient grouping used by the stats dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Honey,
    Fruit,
    Grain,
    Hops,
    Yeast,
    Nutrient,
    Spice,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 8] = [
        IngredientCategory::Honey,
        IngredientCategory::Fruit,
        IngredientCategory::Grain,
        IngredientCategory::Hops,
        IngredientCategory::Yeast,
        IngredientCategory::Nutrient,
        IngredientCategory::Spice,
        IngredientCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Honey => "Honey",
            Self::Fruit => "Fruit",
            Self::Grain => "Grain",
            Self::Hops => "Hops",
            Self::Yeast => "Yeast",
            Self::Nutrient => "Nutrient",
            Self::Spice => "Spice",
            Self::Other => "Other",
        }
    }
}

/// A recipe as shown in list rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub beverage_type: BeverageType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub batch_size_liters: Option<f64>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A pantry ingredient. Only its category and cost feed the stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: IngredientCategory,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Aggregate recipe counts shown in the stats line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeStats {
    pub total: usize,
    pub favorites: usize,
    pub by_type: BTreeMap<BeverageType, usize>,
}

/// Ingredient counts by category plus optional average cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientStats {
    pub total: usize,
    pub by_category: BTreeMap<IngredientCategory, usize>,
    pub average_cost: Option<f64>,
}

impl IngredientStats {
    pub fn count(&self, category: IngredientCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// A one-shot value tagged with the store-assigned sequence that identifies
/// this particular emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal<T> {
    pub seq: u64,
    pub value: T,
}

/// Status flags and one-shot signals owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiStatus {
    pub is_loading: bool,
    pub has_ingredients: bool,
    pub ingredient_count: usize,
    pub initialization_message: Option<String>,
    pub error: Option<Signal<String>>,
    pub success_message: Option<Signal<String>>,
    pub navigation_target: Option<Signal<String>>,
    pub recipe_stats: Option<RecipeStats>,
}

/// Externally owned filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub selected_category: Option<BeverageType>,
    pub favorites_only: bool,
}

impl FilterState {
    pub fn has_query(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// True when any dimension narrows the list.
    pub fn is_active(&self) -> bool {
        self.has_query() || self.selected_category.is_some() || self.favorites_only
    }
}

/// Everything the screen reads, captured at one store revision.
/// `rev` increases on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub rev: u64,
    pub status: UiStatus,
    /// Already filtered by the store.
    pub recipes: Vec<RecipeSummary>,
    pub recent_recipes: Vec<RecipeSummary>,
    pub filter: FilterState,
    pub ingredient_stats: IngredientStats,
}

impl StoreSnapshot {
    pub fn recipe(&self, id: &str) -> Option<&RecipeSummary> {
        self.recipes
            .iter()
            .chain(self.recent_recipes.iter())
            .find(|r| r.id == id)
    }
}
