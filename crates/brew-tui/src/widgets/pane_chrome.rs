//! PaneChrome: bordered pane with focus styling and an optional badge.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_PRIMARY};

/// A badge shown in the top-right of the pane header (e.g. a recipe count).
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(title: &'a str, focused: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(Span::styled(format!(" {} ", title), title_style)));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

/// Row inside a bordered pane that a click at (`column`, `row`) landed on.
/// `None` for clicks on the border or outside `area`.
pub fn inner_row(area: Rect, column: u16, row: u16) -> Option<usize> {
    if area.width < 3 || area.height < 3 {
        return None;
    }
    let inside_cols = column > area.x && column < area.x + area.width - 1;
    let inside_rows = row > area.y && row < area.y + area.height - 1;
    if !(inside_cols && inside_rows) {
        return None;
    }
    row.checked_sub(area.y + 1).map(usize::from)
}
