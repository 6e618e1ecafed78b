//! StatsLine: one-line recipe counts once the store has loaded.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use brew_proto::protocol::RecipeStats;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{beverage_color, C_MUTED, C_SECONDARY, C_STAR},
};

pub struct StatsLine;

impl StatsLine {
    pub fn new() -> Self {
        Self
    }
}

fn stats_spans(stats: &RecipeStats) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(
            format!(" {} recipes", stats.total),
            Style::default().fg(C_SECONDARY),
        ),
        Span::styled(" · ", Style::default().fg(C_MUTED)),
        Span::styled(
            format!("★ {}", stats.favorites),
            Style::default().fg(C_STAR),
        ),
    ];
    for (ty, count) in &stats.by_type {
        spans.push(Span::styled(" · ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(
            format!("{} {}", ty.label(), count),
            Style::default().fg(beverage_color(*ty)),
        ));
    }
    spans
}

impl Component for StatsLine {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn height(&self, state: &AppState) -> u16 {
        let s = &state.snapshot.status;
        u16::from(s.recipe_stats.is_some() && !s.is_loading)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        if let Some(stats) = &state.snapshot.status.recipe_stats {
            frame.render_widget(Paragraph::new(Line::from(stats_spans(stats))), area);
        }
    }
}
