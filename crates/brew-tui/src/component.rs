//! Component trait: the interface every UI panel implements.
//!
//! - Components own their local UI state and render themselves.
//! - Components receive `AppState` (read-only) for store data they don't own.
//! - Components produce `Vec<Action>`; they never talk to the store directly.
//! - The App event-loop dispatches those actions to the store, the navigator
//!   or back to components.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event. Only called when this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Handle a mouse event inside `area`.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called each UI tick.
    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Receive an action dispatched by the App, focused or not.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Called after a new store snapshot has been applied to `state`.
    fn on_snapshot(&mut self, _state: &AppState) {}

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);

    /// Rows this component wants; 0 hides it for this frame.
    fn height(&self, _state: &AppState) -> u16 {
        1
    }
}
