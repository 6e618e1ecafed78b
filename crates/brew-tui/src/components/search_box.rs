//! SearchBox: text input whose every edit is forwarded to the store.
//!
//! The box is editing whenever it holds focus. While unfocused it mirrors
//! the store's query so external changes show up.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{layout::Rect, Frame};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    widgets::filter_input::{FilterAction, FilterInput},
};

pub struct SearchBox {
    input: FilterInput,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            input: FilterInput::new("search recipes"),
        }
    }
}

impl Component for SearchBox {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.input.activate();
        match self.input.handle_key(key) {
            FilterAction::Changed(text) => vec![Action::SearchChanged(text)],
            FilterAction::Confirmed | FilterAction::Cancelled => {
                vec![Action::FocusPane(ComponentId::RecipeList)]
            }
            FilterAction::None => vec![],
        }
    }

    fn on_snapshot(&mut self, state: &AppState) {
        if !self.input.is_active() {
            self.input.set_value(&state.snapshot.filter.search_query);
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::FocusPane(ComponentId::SearchBox) => self.input.activate(),
            Action::FocusPane(_) | Action::FocusNext | Action::FocusPrev => {
                self.input.deactivate();
                self.input.set_value(&state.snapshot.filter.search_query);
            }
            _ => {}
        }
        vec![]
    }

    fn height(&self, state: &AppState) -> u16 {
        u16::from(state.show_search)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        if area.height == 0 {
            return;
        }
        if focused {
            self.input.activate();
        } else {
            self.input.deactivate();
        }
        self.input.draw(frame, area);
    }
}
