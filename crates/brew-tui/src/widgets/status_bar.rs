//! Keys bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_NORMAL, C_MODE_SEARCH, C_MODE_SHEET, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Sheet,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "RECIPES",
            Self::Search => "SEARCH",
            Self::Sheet => "FILTER",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Sheet => C_MODE_SHEET,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " ↑↓/jk select  Enter open  e edit  n new  * fav  / search  f type  v favorites  x clear  r refresh  c check  d debug  ? help  q quit"
            }
            Self::Search => " type to search  Enter keep  Esc leave  Tab next pane",
            Self::Sheet => " ↑↓ choose  Enter apply  Esc close",
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
