//! Action enum: all user-initiated intents and internal events.

use brew_proto::protocol::{BeverageType, Command};

use crate::navigation::Route;

/// Focusable panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBox,
    FilterSummary,
    RecipeList,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Recipe intents ───────────────────────────────────────────────────────
    OpenRecipe(String),
    EditRecipe(String),
    CreateRecipe,
    ToggleFavorite(String),

    // ── Filters ──────────────────────────────────────────────────────────────
    SearchChanged(String),
    SelectCategory(Option<BeverageType>),
    ToggleFavoritesOnly,
    ClearFilters,
    OpenFilterSheet,
    CloseFilterSheet,

    // ── Store maintenance ────────────────────────────────────────────────────
    ForceRefresh,
    CheckStatus,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    Navigate(Route),
    CloseDetail,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleDebug,
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

impl Action {
    /// The store command this intent forwards to, if it is a store intent.
    /// Mapping is one-to-one with no local transformation.
    pub fn store_command(&self) -> Option<Command> {
        match self {
            Action::ToggleFavorite(id) => Some(Command::ToggleFavorite {
                recipe_id: id.clone(),
            }),
            Action::SearchChanged(text) => Some(Command::UpdateSearchQuery { text: text.clone() }),
            Action::SelectCategory(category) => Some(Command::SelectBeverageType {
                category: *category,
            }),
            Action::ToggleFavoritesOnly => Some(Command::ToggleFavoritesFilter),
            Action::ClearFilters => Some(Command::ClearFilters),
            Action::ForceRefresh => Some(Command::ForceInitialization),
            Action::CheckStatus => Some(Command::CheckIngredientStatus),
            _ => None,
        }
    }

    /// The navigation route this intent forwards to, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            Action::OpenRecipe(id) => Some(Route::Recipe(id.clone())),
            Action::EditRecipe(id) => Some(Route::EditRecipe(id.clone())),
            Action::CreateRecipe => Some(Route::NewRecipe),
            Action::Navigate(route) => Some(route.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_intents_forward_verbatim() {
        assert_eq!(
            Action::SearchChanged("  Mead ".into()).store_command(),
            Some(Command::UpdateSearchQuery {
                text: "  Mead ".into()
            })
        );
        assert_eq!(
            Action::SelectCategory(None).store_command(),
            Some(Command::SelectBeverageType { category: None })
        );
        assert_eq!(
            Action::ForceRefresh.store_command(),
            Some(Command::ForceInitialization)
        );
        assert_eq!(Action::OpenFilterSheet.store_command(), None);
    }

    #[test]
    fn navigation_intents_map_to_routes() {
        assert_eq!(
            Action::EditRecipe("cyser".into()).route(),
            Some(Route::EditRecipe("cyser".into()))
        );
        assert_eq!(Action::CreateRecipe.route(), Some(Route::NewRecipe));
        assert_eq!(Action::ToggleFavorite("x".into()).route(), None);
    }
}
