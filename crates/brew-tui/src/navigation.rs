//! Navigation collaborator: where open/edit/create intents go.

use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Recipe(String),
    NewRecipe,
    EditRecipe(String),
}

/// Receives navigation intents from the recipe list screen.
pub trait Navigator {
    fn navigate_to_recipe(&mut self, id: &str);
    fn navigate_to_new_recipe(&mut self);
    fn navigate_to_edit_recipe(&mut self, id: &str);

    /// Route-based entry point used by the App dispatcher.
    fn navigate(&mut self, route: &Route) {
        match route {
            Route::Recipe(id) => self.navigate_to_recipe(id),
            Route::NewRecipe => self.navigate_to_new_recipe(),
            Route::EditRecipe(id) => self.navigate_to_edit_recipe(id),
        }
    }
}

/// Records every route it is asked to show. The App reads `current()` to
/// decide what to draw on top of the list.
#[derive(Debug, Default)]
pub struct RouteHistory {
    routes: Vec<Route>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Route> {
        self.routes.last()
    }

    pub fn back(&mut self) -> Option<Route> {
        self.routes.pop()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

impl Navigator for RouteHistory {
    fn navigate_to_recipe(&mut self, id: &str) {
        info!("navigate: recipe {}", id);
        self.routes.push(Route::Recipe(id.to_string()));
    }

    fn navigate_to_new_recipe(&mut self) {
        info!("navigate: new recipe");
        self.routes.push(Route::NewRecipe);
    }

    fn navigate_to_edit_recipe(&mut self, id: &str) {
        info!("navigate: edit recipe {}", id);
        self.routes.push(Route::EditRecipe(id.to_string()));
    }
}
