//! RecipeDetail: read-only overlay for the recipe the navigator opened.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::centered_rect,
    theme::{beverage_color, style_focused_border, C_BG, C_MUTED, C_PRIMARY, C_SECONDARY, C_STAR},
};

pub struct RecipeDetail {
    recipe_id: Option<String>,
}

impl RecipeDetail {
    pub fn new() -> Self {
        Self { recipe_id: None }
    }

    pub fn show(&mut self, id: &str) {
        self.recipe_id = Some(id.to_string());
    }

    pub fn is_visible(&self) -> bool {
        self.recipe_id.is_some()
    }
}

impl Component for RecipeDetail {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some(id) = self.recipe_id.clone() else {
            return vec![];
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => vec![Action::CloseDetail],
            KeyCode::Char('e') => vec![Action::CloseDetail, Action::EditRecipe(id)],
            KeyCode::Char('*') | KeyCode::Char(' ') => vec![Action::ToggleFavorite(id)],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::CloseDetail = action {
            self.recipe_id = None;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(id) = &self.recipe_id else {
            return;
        };
        let popup = centered_rect(60, 12, area);

        let lines: Vec<Line> = match state.snapshot.recipe(id) {
            Some(r) => {
                let star = if r.favorite { "★ favorite" } else { "☆" };
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" {}", r.name),
                            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(star, Style::default().fg(C_STAR)),
                    ]),
                    Line::from(Span::styled(
                        format!(" {}", r.beverage_type.label()),
                        Style::default().fg(beverage_color(r.beverage_type)),
                    )),
                    Line::from(""),
                ];
                if let Some(l) = r.batch_size_liters {
                    lines.push(Line::from(Span::styled(
                        format!(" Batch size: {:.1} L", l),
                        Style::default().fg(C_SECONDARY),
                    )));
                }
                if let Some(t) = r.updated_at {
                    lines.push(Line::from(Span::styled(
                        format!(" Updated: {}", t.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(C_SECONDARY),
                    )));
                }
                if !r.description.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!(" {}", r.description),
                        Style::default().fg(C_SECONDARY),
                    )));
                }
                lines
            }
            None => vec![Line::from(Span::styled(
                format!(" {} is not in the current list", id),
                Style::default().fg(C_MUTED),
            ))],
        };

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(style_focused_border())
                        .title(" recipe ")
                        .title_bottom(Line::from(" e edit  * favorite  esc close ").right_aligned())
                        .style(Style::default().bg(C_BG)),
                ),
            popup,
        );
    }
}
