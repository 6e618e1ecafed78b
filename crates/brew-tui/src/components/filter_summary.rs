//! FilterSummary: removable chips for the category and favorites filters.
//!
//! Only present while one of those filters is active. The search query is
//! not a chip; it lives in the search box.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use brew_proto::protocol::{BeverageType, FilterState};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_chip, C_MUTED, C_SECONDARY},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Chip {
    Category(BeverageType),
    Favorites,
    ClearAll,
}

impl Chip {
    fn label(self) -> String {
        match self {
            Chip::Category(ty) => format!("{} ×", ty.label()),
            Chip::Favorites => "★ Favorites ×".to_string(),
            Chip::ClearAll => "clear all".to_string(),
        }
    }

    /// The intent that removes this chip.
    pub fn action(self) -> Action {
        match self {
            Chip::Category(_) => Action::SelectCategory(None),
            Chip::Favorites => Action::ToggleFavoritesOnly,
            Chip::ClearAll => Action::ClearFilters,
        }
    }
}

/// Chips for the active filter dimensions, followed by "clear all".
pub fn chips_for(filter: &FilterState) -> Vec<Chip> {
    let mut chips = Vec::new();
    if let Some(ty) = filter.selected_category {
        chips.push(Chip::Category(ty));
    }
    if filter.favorites_only {
        chips.push(Chip::Favorites);
    }
    if !chips.is_empty() {
        chips.push(Chip::ClearAll);
    }
    chips
}

pub struct FilterSummary {
    cursor: usize,
    /// Column ranges of the chips as last drawn, relative to the area.
    hit_ranges: Vec<(u16, u16, Chip)>,
}

impl FilterSummary {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            hit_ranges: Vec::new(),
        }
    }
}

impl Component for FilterSummary {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let chips = chips_for(&state.snapshot.filter);
        if chips.is_empty() {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(chips.len() - 1);
            }
            KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace => {
                let chip = chips[self.cursor.min(chips.len() - 1)];
                return vec![chip.action()];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        let col = event.column.saturating_sub(area.x);
        self.hit_ranges
            .iter()
            .find(|(start, end, _)| col >= *start && col < *end)
            .map(|(_, _, chip)| vec![chip.action()])
            .unwrap_or_default()
    }

    fn on_snapshot(&mut self, state: &AppState) {
        let n = chips_for(&state.snapshot.filter).len();
        self.cursor = self.cursor.min(n.saturating_sub(1));
    }

    fn height(&self, state: &AppState) -> u16 {
        u16::from(state.has_chip_filters())
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.hit_ranges.clear();
        if area.height == 0 {
            return;
        }
        let chips = chips_for(&state.snapshot.filter);
        let mut spans = vec![Span::styled(" filters ", Style::default().fg(C_MUTED))];
        let mut x = spans[0].content.width() as u16;

        for (i, chip) in chips.iter().enumerate() {
            let text = format!(" {} ", chip.label());
            let base = match chip {
                Chip::ClearAll => Style::default().fg(C_SECONDARY),
                _ => style_chip(),
            };
            let style = if focused && i == self.cursor {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            let w = text.width() as u16;
            self.hit_ranges.push((x, x + w, *chip));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += w + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
