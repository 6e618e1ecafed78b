//! StatusBanner: one-line ingredient status plus the optional debug dump.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    banner::{debug_lines, BannerKind},
    component::Component,
    theme::{C_BANNER_EMPTY, C_BANNER_INIT, C_ERROR, C_MUTED, C_OK, C_SECONDARY},
};

pub struct StatusBanner;

impl StatusBanner {
    pub fn new() -> Self {
        Self
    }
}

fn kind_color(kind: BannerKind) -> Color {
    match kind {
        BannerKind::Error => C_ERROR,
        BannerKind::Initializing => C_BANNER_INIT,
        BannerKind::Ready => C_OK,
        BannerKind::NoIngredients => C_BANNER_EMPTY,
    }
}

impl Component for StatusBanner {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn height(&self, state: &AppState) -> u16 {
        if !state.banner.visible {
            return 0;
        }
        let debug = if state.show_debug {
            debug_lines(&state.snapshot.ingredient_stats).len() as u16
        } else {
            0
        };
        1 + debug
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 || !state.banner.visible {
            return;
        }
        let banner = &state.banner;
        let color = kind_color(banner.kind);

        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!(" ● {} ", banner.kind.title()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(banner.message.as_str(), Style::default().fg(C_SECONDARY)),
        ])];

        if state.show_debug {
            for line in debug_lines(&state.snapshot.ingredient_stats) {
                lines.push(Line::from(Span::styled(
                    format!("   {}", line),
                    Style::default().fg(C_MUTED),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
