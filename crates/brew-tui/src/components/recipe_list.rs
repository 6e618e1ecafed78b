//! RecipeList: the primary content region.
//!
//! Draws whichever content state the view projection selected. In the List
//! state it shows the optional Recent section and the full list, with a
//! cursor that skips section headers. Rows are the store's rows in the
//! store's order.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use brew_proto::protocol::RecipeSummary;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    intent::RenderHint,
    navigation::Route,
    theme::{
        beverage_color, style_section, C_ACCENT, C_ERROR, C_MUTED, C_PENDING, C_PRIMARY,
        C_SECONDARY, C_SELECTION_BG, C_STAR,
    },
    view_state::{ListRow, ViewState},
    widgets::{
        pane_chrome::{inner_row, pane_chrome, Badge},
        section_list::SectionList,
    },
};

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct RecipeList {
    list: SectionList,
    /// Recipe id per row; `None` for section headers.
    row_ids: Vec<Option<String>>,
    last_click: Option<(usize, Instant)>,
    spinner_frame: usize,
}

impl RecipeList {
    pub fn new() -> Self {
        Self {
            list: SectionList::new(),
            row_ids: Vec::new(),
            last_click: None,
            spinner_frame: 0,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        let row = self.list.selected_row()?;
        self.row_ids.get(row)?.as_deref()
    }

    /// Move the cursor to the first row showing `id`.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self
            .row_ids
            .iter()
            .position(|r| r.as_deref() == Some(id))
        {
            Some(pos) => {
                self.list.selected = pos;
                true
            }
            None => false,
        }
    }

    /// Rebuild the row layout from the current view, keeping the cursor on
    /// the same recipe when it is still listed.
    fn sync_rows(&mut self, state: &AppState) {
        let previous = self.selected_id().map(str::to_string);
        let previous_row = self.list.selected;

        self.row_ids = match &state.view {
            ViewState::List(list) => list
                .rows()
                .iter()
                .map(|r| r.recipe().map(|s| s.id.clone()))
                .collect(),
            _ => Vec::new(),
        };
        self.list
            .set_rows(self.row_ids.iter().map(Option::is_some).collect());

        if let Some(id) = previous {
            let same_row =
                self.row_ids.get(previous_row).and_then(|r| r.as_deref()) == Some(id.as_str());
            if same_row {
                self.list.selected = previous_row;
            } else {
                self.select_id(&id);
            }
        }
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
        let top = area.height.saturating_sub(lines.len() as u16) / 3;
        let inner = Rect {
            y: area.y + top,
            height: area.height.saturating_sub(top),
            ..area
        };
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(ratatui::layout::Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }

    fn render_recipe<'a>(
        recipe: &'a RecipeSummary,
        is_selected: bool,
        focused: bool,
        hint: RenderHint,
    ) -> ListItem<'a> {
        let (star, star_color): (&str, Color) = match hint {
            RenderHint::Normal if recipe.favorite => ("★", C_STAR),
            RenderHint::Normal => ("☆", C_MUTED),
            RenderHint::PendingVisible => (if recipe.favorite { "★" } else { "☆" }, C_PENDING),
            RenderHint::PendingHidden => (" ", C_PENDING),
            RenderHint::TimedOut => ("?", C_ERROR),
        };

        let name_style = if is_selected {
            let s = Style::default().fg(C_PRIMARY);
            if focused {
                s.add_modifier(Modifier::BOLD)
            } else {
                s
            }
        } else {
            Style::default().fg(C_SECONDARY)
        };

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(star, Style::default().fg(star_color)),
            Span::raw(" "),
            Span::styled(recipe.name.as_str(), name_style),
            Span::raw("  "),
            Span::styled(
                recipe.beverage_type.label(),
                Style::default().fg(beverage_color(recipe.beverage_type)),
            ),
        ];
        if let Some(litres) = recipe.batch_size_liters {
            spans.push(Span::styled(
                format!("  {:.1} L", litres),
                Style::default().fg(C_MUTED),
            ));
        }
        if let Some(updated) = recipe.updated_at {
            spans.push(Span::styled(
                format!("  {}", updated.format("%Y-%m-%d")),
                Style::default().fg(C_MUTED),
            ));
        }
        if !recipe.description.is_empty() {
            spans.push(Span::styled("  ", Style::default()));
            spans.push(Span::styled(
                recipe.description.as_str(),
                Style::default().fg(C_MUTED),
            ));
        }

        let bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(spans)).style(bg)
    }
}

impl Component for RecipeList {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    return vec![Action::OpenRecipe(id.to_string())];
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    return vec![Action::EditRecipe(id.to_string())];
                }
            }
            KeyCode::Char('*') | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    return vec![Action::ToggleFavorite(id.to_string())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.scroll_by(-3),
            MouseEventKind::ScrollDown => self.list.scroll_by(3),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(rel_row) = inner_row(area, event.column, event.row) else {
                    return vec![];
                };
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                if self.list.handle_click(rel_row) && is_double {
                    self.last_click = None;
                    if let Some(id) = self.selected_id() {
                        return vec![Action::OpenRecipe(id.to_string())];
                    }
                } else {
                    self.last_click = Some((rel_row, Instant::now()));
                }
            }
            _ => {}
        }
        vec![]
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if matches!(state.view, ViewState::Loading { .. }) {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
        vec![]
    }

    fn on_snapshot(&mut self, state: &AppState) {
        self.sync_rows(state);
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::Navigate(Route::Recipe(id)) = action {
            self.select_id(id);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = state.snapshot.recipes.len().to_string();
        let badge = matches!(state.view, ViewState::List(_)).then(|| Badge {
            text: count.as_str(),
            color: C_ACCENT,
        });
        let block = pane_chrome("recipes", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &state.view {
            ViewState::Loading { message } => {
                let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
                self.draw_message(
                    frame,
                    inner,
                    vec![Line::from(Span::styled(
                        format!("{} {}", spinner, message),
                        Style::default().fg(C_SECONDARY),
                    ))],
                );
            }
            ViewState::NewUserEmpty => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "No recipes yet",
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press n to create your first recipe",
                        Style::default().fg(C_SECONDARY),
                    )),
                ];
                if !state.snapshot.status.has_ingredients {
                    lines.push(Line::from(Span::styled(
                        "Stock your pantry first: add ingredients to the catalog and press r",
                        Style::default().fg(C_MUTED),
                    )));
                }
                self.draw_message(frame, inner, lines);
            }
            ViewState::NoResults { filter_description } => {
                self.draw_message(
                    frame,
                    inner,
                    vec![
                        Line::from(Span::styled(
                            filter_description.as_str(),
                            Style::default().fg(C_PRIMARY),
                        )),
                        Line::from(""),
                        Line::from(Span::styled(
                            "Press x to clear filters or edit the search",
                            Style::default().fg(C_MUTED),
                        )),
                    ],
                );
            }
            ViewState::List(view) => {
                let height = inner.height as usize;
                self.list.ensure_visible(height);
                let range = self.list.visible_range(height);
                let selected = self.list.selected_row();
                let rows = view.rows();

                let items: Vec<ListItem> = rows[range.clone()]
                    .iter()
                    .zip(range)
                    .map(|(row, idx)| match row {
                        ListRow::Header(title) => {
                            ListItem::new(Line::from(Span::styled(format!(" {}", title), style_section())))
                        }
                        ListRow::Recipe(recipe) => Self::render_recipe(
                            recipe,
                            selected == Some(idx),
                            focused,
                            state.favorite_hint(&recipe.id),
                        ),
                    })
                    .collect();
                frame.render_widget(List::new(items), inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::protocol::{BeverageType, StoreSnapshot};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn recipe(id: &str, favorite: bool) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: id.to_string(),
            beverage_type: BeverageType::Mead,
            description: String::new(),
            batch_size_liters: None,
            favorite,
            updated_at: None,
        }
    }

    fn state_with(snapshot: StoreSnapshot) -> AppState {
        let mut state = AppState::new(true, false, PathBuf::from("brewlog.log"));
        state.apply_snapshot(snapshot);
        state
    }

    fn render(list: &mut RecipeList, state: &AppState) -> String {
        let backend = TestBackend::new(70, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| list.draw(f, f.area(), true, state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn renders_sections_when_recent_present() {
        let state = state_with(StoreSnapshot {
            recipes: vec![recipe("cyser", true), recipe("melomel", false)],
            recent_recipes: vec![recipe("melomel", false)],
            ..StoreSnapshot::default()
        });
        let mut list = RecipeList::new();
        list.on_snapshot(&state);

        let text = render(&mut list, &state);
        assert!(text.contains("Recent Recipes"));
        assert!(text.contains("All Recipes"));
        assert!(text.contains("★ cyser"));

        // Cursor starts on the first recipe under the Recent header.
        assert_eq!(list.selected_id(), Some("melomel"));
        list.handle_key(key(KeyCode::Down), &state);
        assert_eq!(list.selected_id(), Some("cyser"));
    }

    #[test]
    fn renders_new_user_empty_state() {
        let state = state_with(StoreSnapshot::default());
        let mut list = RecipeList::new();
        list.on_snapshot(&state);
        let text = render(&mut list, &state);
        assert!(text.contains("No recipes yet"));
        assert_eq!(list.selected_id(), None);
        assert!(list.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn keys_emit_recipe_intents() {
        let state = state_with(StoreSnapshot {
            recipes: vec![recipe("cyser", false)],
            ..StoreSnapshot::default()
        });
        let mut list = RecipeList::new();
        list.on_snapshot(&state);

        assert_eq!(
            list.handle_key(key(KeyCode::Enter), &state),
            vec![Action::OpenRecipe("cyser".into())]
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('e')), &state),
            vec![Action::EditRecipe("cyser".into())]
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('*')), &state),
            vec![Action::ToggleFavorite("cyser".into())]
        );
    }

    #[test]
    fn border_click_leaves_cursor_alone() {
        let state = state_with(StoreSnapshot {
            recipes: vec![recipe("a", false), recipe("b", false), recipe("c", false)],
            ..StoreSnapshot::default()
        });
        let mut list = RecipeList::new();
        list.on_snapshot(&state);
        list.handle_key(key(KeyCode::Char('G')), &state);

        let area = Rect::new(0, 2, 60, 10);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        assert!(list.handle_mouse(click(5, 2), area, &state).is_empty());
        assert!(list.handle_mouse(click(0, 4), area, &state).is_empty());
        assert_eq!(list.selected_id(), Some("c"));

        list.handle_mouse(click(5, 3), area, &state);
        assert_eq!(list.selected_id(), Some("a"));
    }

    #[test]
    fn cursor_follows_recipe_across_snapshots() {
        let mut list = RecipeList::new();
        let first = state_with(StoreSnapshot {
            recipes: vec![recipe("a", false), recipe("b", false), recipe("c", false)],
            ..StoreSnapshot::default()
        });
        list.on_snapshot(&first);
        list.handle_key(key(KeyCode::Char('G')), &first);
        assert_eq!(list.selected_id(), Some("c"));

        // "c" becomes a favorite and the store moves it to the top.
        let second = state_with(StoreSnapshot {
            recipes: vec![recipe("c", true), recipe("a", false), recipe("b", false)],
            ..StoreSnapshot::default()
        });
        list.on_snapshot(&second);
        assert_eq!(list.selected_id(), Some("c"));
    }
}
