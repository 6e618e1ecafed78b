//! View-state projection: maps a store snapshot to exactly one of the
//! mutually exclusive content states of the recipe list screen.

use brew_proto::protocol::{FilterState, RecipeSummary, StoreSnapshot};

pub const DEFAULT_LOADING_TEXT: &str = "Loading...";
pub const RECENT_SECTION_LIMIT: usize = 3;
pub const RECENT_HEADER: &str = "Recent Recipes";
pub const ALL_HEADER: &str = "All Recipes";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading { message: String },
    NewUserEmpty,
    NoResults { filter_description: String },
    List(ListView),
}

/// Content of the List state. `recent` is empty when the Recent section is
/// not shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub recent: Vec<RecipeSummary>,
    pub all: Vec<RecipeSummary>,
}

impl ListView {
    pub fn shows_recent(&self) -> bool {
        !self.recent.is_empty()
    }

    /// Flattened rows in display order.
    pub fn rows(&self) -> Vec<ListRow<'_>> {
        let mut rows = Vec::with_capacity(self.all.len() + self.recent.len() + 2);
        if self.shows_recent() {
            rows.push(ListRow::Header(RECENT_HEADER));
            rows.extend(self.recent.iter().map(ListRow::Recipe));
            rows.push(ListRow::Header(ALL_HEADER));
        }
        rows.extend(self.all.iter().map(ListRow::Recipe));
        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListRow<'a> {
    Header(&'static str),
    Recipe(&'a RecipeSummary),
}

impl ListRow<'_> {
    pub fn recipe(&self) -> Option<&RecipeSummary> {
        match self {
            ListRow::Recipe(r) => Some(r),
            ListRow::Header(_) => None,
        }
    }
}

/// First match wins: loading, new-user empty, no results, list.
pub fn select_view_state(snapshot: &StoreSnapshot) -> ViewState {
    let status = &snapshot.status;
    let filter = &snapshot.filter;

    if status.is_loading {
        let message = status
            .initialization_message
            .clone()
            .unwrap_or_else(|| DEFAULT_LOADING_TEXT.to_string());
        return ViewState::Loading { message };
    }

    if snapshot.recipes.is_empty() {
        if !filter.is_active() {
            return ViewState::NewUserEmpty;
        }
        return ViewState::NoResults {
            filter_description: describe_active_filters(filter),
        };
    }

    let recent = if filter.is_active() {
        Vec::new()
    } else {
        snapshot
            .recent_recipes
            .iter()
            .take(RECENT_SECTION_LIMIT)
            .cloned()
            .collect()
    };

    ViewState::List(ListView {
        recent,
        all: snapshot.recipes.clone(),
    })
}

/// Human-readable summary naming exactly the active filter dimensions.
pub fn describe_active_filters(filter: &FilterState) -> String {
    let mut parts = Vec::new();
    if filter.has_query() {
        parts.push(format!("matching \"{}\"", filter.search_query.trim()));
    }
    if let Some(category) = filter.selected_category {
        parts.push(format!("of type {}", category.label()));
    }
    if filter.favorites_only {
        parts.push("in favorites".to_string());
    }
    if parts.is_empty() {
        return String::new();
    }
    format!("No recipes {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::protocol::BeverageType;

    fn recipe(id: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: id.to_string(),
            beverage_type: BeverageType::Mead,
            description: String::new(),
            batch_size_liters: None,
            favorite: false,
            updated_at: None,
        }
    }

    fn many(n: usize) -> Vec<RecipeSummary> {
        (0..n).map(|i| recipe(&format!("r{}", i))).collect()
    }

    fn all_filter_combos() -> Vec<FilterState> {
        let mut out = Vec::new();
        for query in ["", "  ", "mead"] {
            for category in [None, Some(BeverageType::Wine)] {
                for favorites_only in [false, true] {
                    out.push(FilterState {
                        search_query: query.to_string(),
                        selected_category: category,
                        favorites_only,
                    });
                }
            }
        }
        out
    }

    #[test]
    fn loading_wins_over_everything() {
        for filter in all_filter_combos() {
            for recipes in [Vec::new(), many(4)] {
                let mut snap = StoreSnapshot {
                    recipes,
                    recent_recipes: many(2),
                    filter: filter.clone(),
                    ..StoreSnapshot::default()
                };
                snap.status.is_loading = true;
                assert_eq!(
                    select_view_state(&snap),
                    ViewState::Loading {
                        message: DEFAULT_LOADING_TEXT.to_string()
                    }
                );
                snap.status.initialization_message = Some("Scanning pantry".into());
                assert_eq!(
                    select_view_state(&snap),
                    ViewState::Loading {
                        message: "Scanning pantry".to_string()
                    }
                );
            }
        }
    }

    #[test]
    fn empty_without_filters_is_new_user() {
        let snap = StoreSnapshot {
            filter: FilterState {
                search_query: "   ".into(),
                ..FilterState::default()
            },
            recent_recipes: many(2),
            ..StoreSnapshot::default()
        };
        assert_eq!(select_view_state(&snap), ViewState::NewUserEmpty);
    }

    #[test]
    fn empty_with_filters_names_exactly_active_dimensions() {
        for filter in all_filter_combos().into_iter().filter(|f| f.is_active()) {
            let snap = StoreSnapshot {
                filter: filter.clone(),
                ..StoreSnapshot::default()
            };
            let ViewState::NoResults { filter_description } = select_view_state(&snap) else {
                panic!("expected NoResults for {:?}", filter);
            };
            assert_eq!(filter_description.contains("matching"), filter.has_query());
            assert_eq!(
                filter_description.contains("of type Wine"),
                filter.selected_category.is_some()
            );
            assert_eq!(
                filter_description.contains("in favorites"),
                filter.favorites_only
            );
        }
    }

    #[test]
    fn recent_section_is_capped_at_three() {
        for n in 1..=5 {
            let snap = StoreSnapshot {
                recipes: many(6),
                recent_recipes: many(n),
                ..StoreSnapshot::default()
            };
            let ViewState::List(list) = select_view_state(&snap) else {
                panic!("expected list");
            };
            assert_eq!(list.recent.len(), n.min(RECENT_SECTION_LIMIT));
            assert_eq!(list.all.len(), 6);

            let rows = list.rows();
            assert_eq!(rows[0], ListRow::Header(RECENT_HEADER));
            let all_at = 1 + n.min(RECENT_SECTION_LIMIT);
            assert_eq!(rows[all_at], ListRow::Header(ALL_HEADER));
            assert_eq!(rows.len(), all_at + 1 + 6);
        }
    }

    #[test]
    fn recent_hidden_when_filtering_or_empty() {
        let filtered = StoreSnapshot {
            recipes: many(2),
            recent_recipes: many(2),
            filter: FilterState {
                favorites_only: true,
                ..FilterState::default()
            },
            ..StoreSnapshot::default()
        };
        let ViewState::List(list) = select_view_state(&filtered) else {
            panic!("expected list");
        };
        assert!(!list.shows_recent());
        assert!(list.rows().iter().all(|r| r.recipe().is_some()));

        let no_recent = StoreSnapshot {
            recipes: many(2),
            ..StoreSnapshot::default()
        };
        let ViewState::List(list) = select_view_state(&no_recent) else {
            panic!("expected list");
        };
        assert_eq!(list.rows().len(), 2);
    }
}
