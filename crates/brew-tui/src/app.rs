//! App: component-based event loop for the recipe list screen.
//!
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The loop redraws only after something changed, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Store commands flow out through `cmd_tx`; snapshots come back via the
//!   broadcast channel. The screen never polls the store.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use brew_proto::config::UiConfig;
use brew_proto::protocol::{Command, StoreSnapshot};
use brew_proto::state::RecipeStore;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        filter_sheet::FilterSheet, filter_summary::FilterSummary, help_overlay::HelpOverlay,
        recipe_detail::RecipeDetail, recipe_list::RecipeList, search_box::SearchBox,
        stats_line::StatsLine, status_banner::StatusBanner,
    },
    core::StoreEvent,
    focus::FocusRing,
    navigation::{Navigator, Route, RouteHistory},
    signals::{OneShotSignals, SignalEvent},
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
    BroadcastMessage,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    StateUpdated(StoreSnapshot),
    Log(String),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn layout rects, used by `handle_mouse` for hit-testing.
#[derive(Default, Clone)]
struct PaneAreas {
    search_box: Rect,
    filter_summary: Rect,
    recipe_list: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    status_banner: StatusBanner,
    search_box: SearchBox,
    filter_summary: FilterSummary,
    stats_line: StatsLine,
    recipe_list: RecipeList,
    filter_sheet: FilterSheet,
    recipe_detail: RecipeDetail,
    help_overlay: HelpOverlay,

    focus: FocusRing,
    toast: ToastManager,
    signals: OneShotSignals,
    navigator: RouteHistory,

    // ── Session bookkeeping ───────────────────────────────────────────────────
    cmd_tx: mpsc::Sender<StoreEvent>,
    store: Arc<RecipeStore>,
    tick: Duration,
    should_quit: bool,
    pane_areas: PaneAreas,
}

impl App {
    pub fn new(
        ui: &UiConfig,
        store: Arc<RecipeStore>,
        cmd_tx: mpsc::Sender<StoreEvent>,
        log_path: PathBuf,
    ) -> Self {
        let state = AppState::new(ui.show_search, ui.debug_panel, log_path);
        let mut app = Self {
            state,
            status_banner: StatusBanner::new(),
            search_box: SearchBox::new(),
            filter_summary: FilterSummary::new(),
            stats_line: StatsLine::new(),
            recipe_list: RecipeList::new(),
            filter_sheet: FilterSheet::new(),
            recipe_detail: RecipeDetail::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::default(),
            toast: ToastManager::new(),
            signals: OneShotSignals::new(),
            navigator: RouteHistory::new(),
            cmd_tx,
            store,
            tick: Duration::from_millis(ui.tick_ms.max(16)),
            should_quit: false,
            pane_areas: PaneAreas::default(),
        };
        app.sync_focus_ring();
        app.focus.set(ComponentId::RecipeList);
        app
    }

    pub async fn run(
        mut self,
        mut broadcast_rx: broadcast::Receiver<BroadcastMessage>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            while let Ok(ev) = event::read() {
                if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
        });

        // ── Background task: broadcast receiver (StoreCore → AppMessage) ──────
        let bc_tx = tx.clone();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            loop {
                match broadcast_rx.recv().await {
                    Ok(msg) => {
                        let app_msg = match msg {
                            BroadcastMessage::StateUpdated => {
                                AppMessage::StateUpdated(store.snapshot().await)
                            }
                            BroadcastMessage::Log(s) => AppMessage::Log(s),
                        };
                        if bc_tx.send(app_msg).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Only the latest snapshot matters.
                        warn!("broadcast receiver lagged by {} messages", n);
                        let snap = store.snapshot().await;
                        if bc_tx.send(AppMessage::StateUpdated(snap)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        // Toast expiry, pending-star pulse and loading spinner.
        let mut ui_tick = tokio::time::interval(self.tick);
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    let mut redraw = self.handle_message(msg).await;
                    while let Ok(next) = rx.try_recv() {
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = ui_tick.tick() => {
                    needs_redraw = self.on_tick().await;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        let _ = self.cmd_tx.send(StoreEvent::Shutdown).await;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("brewlog exiting");
        Ok(())
    }

    /// Returns whether a redraw is needed.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Mouse(m)) => {
                let actions = self.handle_mouse(m);
                let redraw = !actions.is_empty()
                    || matches!(
                        m.kind,
                        MouseEventKind::Down(_)
                            | MouseEventKind::ScrollUp
                            | MouseEventKind::ScrollDown
                    );
                for action in actions {
                    self.dispatch(action).await;
                }
                redraw
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                self.dispatch(Action::Resize(w, h)).await;
                true
            }
            AppMessage::Event(_) => false,
            AppMessage::StateUpdated(snapshot) => {
                self.on_snapshot(snapshot).await;
                true
            }
            AppMessage::Log(line) => {
                self.toast.info(line);
                true
            }
        }
    }

    async fn on_tick(&mut self) -> bool {
        let mut redraw = self.toast.tick();
        redraw |= self.state.favorite_intents.tick();

        let tick_actions: Vec<Action> = {
            let s = &self.state;
            let mut all = Vec::new();
            all.extend(self.recipe_list.tick(s));
            all.extend(self.filter_summary.tick(s));
            all
        };
        for action in tick_actions {
            self.dispatch(action).await;
        }
        redraw || self.state.snapshot.status.is_loading
    }

    // ── Store snapshots ───────────────────────────────────────────────────────

    pub async fn on_snapshot(&mut self, snapshot: StoreSnapshot) {
        if snapshot.rev < self.state.snapshot.rev {
            debug!(
                "dropping stale snapshot rev {} (have {})",
                snapshot.rev, self.state.snapshot.rev
            );
            return;
        }
        debug!(
            "snapshot rev {}: {} recipes, loading={}",
            snapshot.rev,
            snapshot.recipes.len(),
            snapshot.status.is_loading
        );
        self.state.apply_snapshot(snapshot);
        {
            let s = &self.state;
            self.search_box.on_snapshot(s);
            self.filter_summary.on_snapshot(s);
            self.recipe_list.on_snapshot(s);
        }
        self.sync_focus_ring();

        for event in self.signals.drain(&self.state.snapshot.status) {
            info!("signal: {:?}", event);
            match &event {
                SignalEvent::Navigate { recipe_id, .. } => {
                    self.dispatch(Action::Navigate(Route::Recipe(recipe_id.clone())))
                        .await;
                }
                SignalEvent::Success { message, .. } => {
                    self.toast.dismiss_spinner();
                    self.toast.success(message.clone());
                }
                SignalEvent::Error { message, .. } => {
                    self.toast.dismiss_spinner();
                    self.toast.error(message.clone());
                }
            }
            self.send_cmd(event.ack()).await;
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        let s = &self.state;

        // Overlays capture all keys while visible, topmost first.
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, s);
        }
        if self.filter_sheet.visible {
            return self.filter_sheet.handle_key(key, s);
        }
        if self.recipe_detail.is_visible() {
            return self.recipe_detail.handle_key(key, s);
        }

        match key.code {
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        if self.focus.is_focused(ComponentId::SearchBox) {
            return self.search_box.handle_key(key, s);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('/') => return vec![Action::FocusPane(ComponentId::SearchBox)],
            KeyCode::Char('f') => return vec![Action::OpenFilterSheet],
            KeyCode::Char('v') => return vec![Action::ToggleFavoritesOnly],
            KeyCode::Char('x') => return vec![Action::ClearFilters],
            KeyCode::Char('r') => return vec![Action::ForceRefresh],
            KeyCode::Char('c') => return vec![Action::CheckStatus],
            KeyCode::Char('d') => return vec![Action::ToggleDebug],
            KeyCode::Char('n') => return vec![Action::CreateRecipe],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            _ => {}
        }

        match self.focus.current() {
            Some(ComponentId::FilterSummary) => self.filter_summary.handle_key(key, s),
            Some(ComponentId::RecipeList) => self.recipe_list.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        let s = &self.state;
        let clicked = matches!(event.kind, MouseEventKind::Down(_));

        if self.help_overlay.visible {
            return if clicked { vec![Action::ToggleHelp] } else { vec![] };
        }
        if self.filter_sheet.visible {
            let area = self.filter_sheet.area();
            if hit(area, col, row) {
                return self.filter_sheet.handle_mouse(event, area, s);
            }
            return if clicked {
                vec![Action::CloseFilterSheet]
            } else {
                vec![]
            };
        }
        if self.recipe_detail.is_visible() {
            return if clicked { vec![Action::CloseDetail] } else { vec![] };
        }

        let areas = self.pane_areas.clone();
        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if clicked && !self.focus.is_focused($id) {
                    actions.insert(0, Action::FocusPane($id));
                }
                return actions;
            }};
        }

        if hit(areas.recipe_list, col, row) {
            click_pane!(ComponentId::RecipeList, self.recipe_list, areas.recipe_list);
        }
        if hit(areas.filter_summary, col, row) {
            click_pane!(
                ComponentId::FilterSummary,
                self.filter_summary,
                areas.filter_summary
            );
        }
        if hit(areas.search_box, col, row) && clicked {
            return vec![Action::FocusPane(ComponentId::SearchBox)];
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Components react first (sheet visibility, list cursor, help toggle).
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.search_box.on_action(&action, s));
            out.extend(self.filter_summary.on_action(&action, s));
            out.extend(self.recipe_list.on_action(&action, s));
            out.extend(self.filter_sheet.on_action(&action, s));
            out.extend(self.recipe_detail.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Secondary actions are applied one level deep only.
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        match &action {
            Action::SearchChanged(_) | Action::Resize(..) => {}
            _ => debug!("apply_action: {:?}", action),
        }

        if let Some(cmd) = action.store_command() {
            match &action {
                Action::ToggleFavorite(id) => {
                    let current = self
                        .state
                        .snapshot
                        .recipe(id)
                        .map(|r| r.favorite)
                        .unwrap_or(false);
                    self.state.favorite_intents.toggled(id, current);
                }
                Action::CheckStatus => self.toast.spinner("Checking ingredients…"),
                _ => {}
            }
            self.send_cmd(cmd).await;
            return;
        }

        if let Some(route) = action.route() {
            self.navigator.navigate(&route);
            debug!("route stack depth {}", self.navigator.len());
            match &route {
                Route::Recipe(id) => self.recipe_detail.show(id),
                Route::NewRecipe => self.toast.info("Opening editor for a new recipe"),
                Route::EditRecipe(id) => {
                    let name = self
                        .state
                        .snapshot
                        .recipe(id)
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| id.clone());
                    self.toast.info(format!("Opening editor for {}", name));
                }
            }
            // Editor screens live outside brewlog; only the detail overlay stays open.
            if !matches!(route, Route::Recipe(_)) {
                self.navigator.back();
            }
            return;
        }

        match action {
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => {
                if id == ComponentId::SearchBox && !self.state.show_search {
                    self.state.show_search = true;
                    self.sync_focus_ring();
                }
                self.focus.set(id);
            }
            Action::CloseDetail => {
                if matches!(self.navigator.current(), Some(Route::Recipe(_))) {
                    self.navigator.back();
                }
            }
            Action::ToggleDebug => {
                let on = !self.state.show_debug;
                self.state.set_debug(on);
            }
            Action::ToggleKeys => self.state.show_keys = !self.state.show_keys,
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            // Handled by components in `dispatch`.
            Action::OpenFilterSheet | Action::CloseFilterSheet | Action::ToggleHelp => {}
            Action::Resize(..) => {}
            other => debug!("apply_action: unhandled {:?}", other),
        }
        self.sync_input_mode();
    }

    async fn send_cmd(&mut self, cmd: Command) {
        if self.cmd_tx.send(StoreEvent::Command(cmd)).await.is_err() {
            warn!("store loop is gone; command dropped");
            self.toast.warning("Recipe store stopped; restart brewlog");
        }
    }

    fn sync_focus_ring(&mut self) {
        let mut items = Vec::with_capacity(3);
        if self.state.show_search {
            items.push(ComponentId::SearchBox);
        }
        if self.state.has_chip_filters() {
            items.push(ComponentId::FilterSummary);
        }
        items.push(ComponentId::RecipeList);
        self.focus.set_items(items);
        self.sync_input_mode();
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.filter_sheet.visible {
            InputMode::Sheet
        } else if self.focus.is_focused(ComponentId::SearchBox) {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;

        let area = frame.area();
        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        let s = &self.state;
        let banner_h = self.status_banner.height(s);
        let search_h = self.search_box.height(s);
        let summary_h = self.filter_summary.height(s);
        let stats_h = self.stats_line.height(s);
        let keys_h = u16::from(s.show_keys);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_h),
                Constraint::Length(search_h),
                Constraint::Length(summary_h),
                Constraint::Length(stats_h),
                Constraint::Min(3),
                Constraint::Length(keys_h),
            ])
            .split(area);

        self.pane_areas = PaneAreas {
            search_box: rows[1],
            filter_summary: rows[2],
            recipe_list: rows[4],
        };

        let focus = &self.focus;
        self.status_banner.draw(frame, rows[0], false, s);
        self.search_box
            .draw(frame, rows[1], focus.is_focused(ComponentId::SearchBox), s);
        self.filter_summary
            .draw(frame, rows[2], focus.is_focused(ComponentId::FilterSummary), s);
        self.stats_line.draw(frame, rows[3], false, s);
        self.recipe_list
            .draw(frame, rows[4], focus.is_focused(ComponentId::RecipeList), s);
        if s.show_keys {
            status_bar::draw_keys_bar(frame, rows[5], s.input_mode);
        }

        // ── Overlays ──────────────────────────────────────────────────────────
        self.filter_sheet.draw(frame, area, true, s);
        self.recipe_detail.draw(frame, area, true, s);
        self.help_overlay.draw(frame, area, true, s);
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_proto::config::StoreConfig;
    use brew_proto::protocol::{BeverageType, RecipeSummary, Signal};
    use ratatui::backend::TestBackend;
    use crate::view_state::ViewState;

    fn recipe(id: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: id.to_string(),
            beverage_type: BeverageType::Cider,
            description: String::new(),
            batch_size_liters: Some(19.0),
            favorite: false,
            updated_at: None,
        }
    }

    fn app() -> (App, mpsc::Receiver<StoreEvent>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecipeStore::new(&StoreConfig {
            catalog_file: dir.path().join("catalog.toml"),
            state_file: dir.path().join("state.json"),
            recent_limit: 5,
        });
        let (tx, rx) = mpsc::channel(64);
        let app = App::new(
            &UiConfig::default(),
            Arc::new(store),
            tx,
            PathBuf::from("brewlog.log"),
        );
        (app, rx, dir)
    }

    fn commands(rx: &mut mpsc::Receiver<StoreEvent>) -> Vec<Command> {
        let mut out = Vec::new();
        while let Ok(StoreEvent::Command(cmd)) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
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

    #[tokio::test]
    async fn signals_act_once_and_are_acknowledged() {
        let (mut app, mut rx, _dir) = app();
        let mut snap = StoreSnapshot {
            rev: 5,
            recipes: vec![recipe("perry")],
            ..StoreSnapshot::default()
        };
        snap.status.has_ingredients = true;
        snap.status.navigation_target = Some(Signal {
            seq: 3,
            value: "perry".into(),
        });
        snap.status.success_message = Some(Signal {
            seq: 4,
            value: "Imported 1 recipe(s)".into(),
        });

        app.on_snapshot(snap.clone()).await;
        assert_eq!(
            commands(&mut rx),
            vec![
                Command::ClearNavigationTarget { seq: 3 },
                Command::ClearSuccessMessage { seq: 4 }
            ]
        );
        assert_eq!(app.navigator.len(), 1);
        assert!(app.recipe_detail.is_visible());

        // Re-rendering the same state (or a later rev still carrying the
        // signals) does nothing.
        app.on_snapshot(snap.clone()).await;
        snap.rev = 6;
        app.on_snapshot(snap).await;
        assert!(commands(&mut rx).is_empty());
        assert_eq!(app.navigator.len(), 1);
    }

    #[tokio::test]
    async fn intents_forward_to_store_unchanged() {
        let (mut app, mut rx, _dir) = app();
        app.on_snapshot(StoreSnapshot {
            rev: 2,
            recipes: vec![recipe("perry")],
            ..StoreSnapshot::default()
        })
        .await;
        commands(&mut rx);

        for code in [KeyCode::Char('v'), KeyCode::Char('x'), KeyCode::Char('r'), KeyCode::Char('*')] {
            for action in app.handle_key(key(code)) {
                app.dispatch(action).await;
            }
        }
        assert_eq!(
            commands(&mut rx),
            vec![
                Command::ToggleFavoritesFilter,
                Command::ClearFilters,
                Command::ForceInitialization,
                Command::ToggleFavorite {
                    recipe_id: "perry".into()
                },
            ]
        );
        assert!(!app.state.favorite_intents.is_empty());
    }

    #[tokio::test]
    async fn filter_sheet_selection_sends_command_and_closes() {
        let (mut app, mut rx, _dir) = app();
        for code in [KeyCode::Char('f'), KeyCode::Down, KeyCode::Enter] {
            for action in app.handle_key(key(code)) {
                app.dispatch(action).await;
            }
        }
        assert!(!app.filter_sheet.visible);
        assert_eq!(
            commands(&mut rx),
            vec![Command::SelectBeverageType {
                category: Some(BeverageType::Mead)
            }]
        );
    }

    #[tokio::test]
    async fn typing_in_search_forwards_each_edit() {
        let (mut app, mut rx, _dir) = app();
        for code in [KeyCode::Char('/'), KeyCode::Char('a'), KeyCode::Char('l')] {
            for action in app.handle_key(key(code)) {
                app.dispatch(action).await;
            }
        }
        assert_eq!(app.state.input_mode, InputMode::Search);
        assert_eq!(
            commands(&mut rx),
            vec![
                Command::UpdateSearchQuery { text: "a".into() },
                Command::UpdateSearchQuery { text: "al".into() },
            ]
        );

        for action in app.handle_key(key(KeyCode::Esc)) {
            app.dispatch(action).await;
        }
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn renders_banner_and_empty_state_for_new_user() {
        let (mut app, _rx, _dir) = app();
        app.on_snapshot(StoreSnapshot {
            rev: 2,
            ..StoreSnapshot::default()
        })
        .await;
        let text = screen(&mut app);
        assert!(text.contains("No ingredients"));
        assert!(text.contains("No recipes yet"));
    }

    #[tokio::test]
    async fn renders_chips_and_no_results() {
        let (mut app, _rx, _dir) = app();
        let mut snap = StoreSnapshot {
            rev: 2,
            ..StoreSnapshot::default()
        };
        snap.status.has_ingredients = true;
        snap.filter.favorites_only = true;
        snap.filter.selected_category = Some(BeverageType::Wine);
        app.on_snapshot(snap).await;

        let text = screen(&mut app);
        assert!(text.contains("Wine ×"));
        assert!(text.contains("clear all"));
        assert!(text.contains("No recipes of type Wine, in favorites"));
    }

    #[tokio::test]
    async fn older_snapshot_is_dropped() {
        let (mut app, _rx, _dir) = app();
        app.on_snapshot(StoreSnapshot {
            rev: 6,
            recipes: vec![recipe("perry")],
            ..StoreSnapshot::default()
        })
        .await;
        app.on_snapshot(StoreSnapshot {
            rev: 5,
            ..StoreSnapshot::default()
        })
        .await;

        assert_eq!(app.state.snapshot.rev, 6);
        assert!(matches!(app.state.view, ViewState::List(_)));
    }

    #[tokio::test]
    async fn editor_routes_do_not_pile_up() {
        let (mut app, _rx, _dir) = app();
        app.on_snapshot(StoreSnapshot {
            rev: 2,
            recipes: vec![recipe("perry")],
            ..StoreSnapshot::default()
        })
        .await;

        for code in [KeyCode::Char('n'), KeyCode::Char('n'), KeyCode::Enter, KeyCode::Char('e')] {
            for action in app.handle_key(key(code)) {
                app.dispatch(action).await;
            }
        }
        assert_eq!(app.navigator.len(), 0);
        assert!(!app.recipe_detail.is_visible());
    }
}
