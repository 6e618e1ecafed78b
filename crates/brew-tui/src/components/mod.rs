pub mod filter_sheet;
pub mod filter_summary;
pub mod help_overlay;
pub mod recipe_detail;
pub mod recipe_list;
pub mod search_box;
pub mod stats_line;
pub mod status_banner;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Popup rect `percent_x` wide and `height` rows tall, centered in `r`.
pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
