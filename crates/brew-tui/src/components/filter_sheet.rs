//! FilterSheet: modal list of beverage types plus "All types".
//!
//! Choosing an entry applies it and closes the sheet in one step.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use brew_proto::protocol::BeverageType;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::centered_rect,
    widgets::pane_chrome::inner_row,
    theme::{
        beverage_color, style_focused_border, C_ACCENT, C_BG, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG,
    },
};

/// `None` is the "All types" entry.
fn entries() -> Vec<Option<BeverageType>> {
    std::iter::once(None)
        .chain(BeverageType::ALL.iter().copied().map(Some))
        .collect()
}

pub struct FilterSheet {
    pub visible: bool,
    selected: usize,
    area: Rect,
}

impl FilterSheet {
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: 0,
            area: Rect::default(),
        }
    }

    fn open(&mut self, current: Option<BeverageType>) {
        self.visible = true;
        self.selected = entries().iter().position(|e| *e == current).unwrap_or(0);
    }

    /// Apply the highlighted entry and dismiss.
    fn choose(&self) -> Vec<Action> {
        let entry = entries().get(self.selected).copied().flatten();
        vec![Action::SelectCategory(entry), Action::CloseFilterSheet]
    }

    /// Last-drawn popup rect, for mouse hit-testing.
    pub fn area(&self) -> Rect {
        self.area
    }
}

impl Component for FilterSheet {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        let last = entries().len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = last,
            KeyCode::Enter => return self.choose(),
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => {
                return vec![Action::CloseFilterSheet]
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                self.selected = (self.selected + 1).min(entries().len() - 1)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(row) = inner_row(area, event.column, event.row) else {
                    return vec![];
                };
                if row < entries().len() {
                    self.selected = row;
                    return self.choose();
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenFilterSheet => self.open(state.snapshot.filter.selected_category),
            Action::CloseFilterSheet => self.visible = false,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            self.area = Rect::default();
            return;
        }
        let list = entries();
        let popup = centered_rect(40, list.len() as u16 + 2, area);
        self.area = popup;
        let current = state.snapshot.filter.selected_category;

        let items: Vec<ListItem> = list
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let (label, color) = match entry {
                    Some(ty) => (ty.label(), beverage_color(*ty)),
                    None => ("All types", C_PRIMARY),
                };
                let mark = if *entry == current { "●" } else { " " };
                let style = if i == self.selected {
                    Style::default()
                        .fg(C_PRIMARY)
                        .bg(C_SELECTION_BG)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(C_ACCENT)),
                    Span::styled("■ ", Style::default().fg(color)),
                    Span::styled(label, style),
                ]))
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style_focused_border())
                    .title(" beverage type ")
                    .style(Style::default().bg(C_BG)),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(true, false, PathBuf::from("brewlog.log"))
    }

    #[test]
    fn selecting_applies_and_dismisses_in_one_step() {
        let s = state();
        let mut sheet = FilterSheet::new();
        sheet.on_action(&Action::OpenFilterSheet, &s);
        assert!(sheet.visible);

        sheet.handle_key(key(KeyCode::Down), &s);
        sheet.handle_key(key(KeyCode::Down), &s);
        let actions = sheet.handle_key(key(KeyCode::Enter), &s);
        assert_eq!(
            actions,
            vec![
                Action::SelectCategory(Some(BeverageType::Beer)),
                Action::CloseFilterSheet
            ]
        );

        for a in &actions {
            sheet.on_action(a, &s);
        }
        assert!(!sheet.visible);
    }

    #[test]
    fn all_types_entry_clears_category() {
        let mut s = state();
        s.snapshot.filter.selected_category = Some(BeverageType::Wine);
        let mut sheet = FilterSheet::new();
        sheet.on_action(&Action::OpenFilterSheet, &s);
        sheet.handle_key(key(KeyCode::Char('g')), &s);
        assert_eq!(
            sheet.handle_key(key(KeyCode::Enter), &s)[0],
            Action::SelectCategory(None)
        );
    }

    #[test]
    fn border_click_keeps_filter_and_sheet() {
        let mut s = state();
        s.snapshot.filter.selected_category = Some(BeverageType::Wine);
        let mut sheet = FilterSheet::new();
        sheet.on_action(&Action::OpenFilterSheet, &s);

        let area = Rect::new(20, 4, 40, 9);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        assert!(sheet.handle_mouse(click(30, 4), area, &s).is_empty());
        assert!(sheet.handle_mouse(click(20, 6), area, &s).is_empty());
        assert!(sheet.visible);

        // First row inside the border is "All types".
        assert_eq!(
            sheet.handle_mouse(click(30, 5), area, &s),
            vec![Action::SelectCategory(None), Action::CloseFilterSheet]
        );
    }

    #[test]
    fn escape_dismisses_without_selecting() {
        let s = state();
        let mut sheet = FilterSheet::new();
        sheet.on_action(&Action::OpenFilterSheet, &s);
        assert_eq!(
            sheet.handle_key(key(KeyCode::Esc), &s),
            vec![Action::CloseFilterSheet]
        );
    }
}
