use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::action::Action;
use crate::api::{Api, ApiError};
use crate::components::users::{USER_COLS, Users, col_by_id, model_order};
use crate::components::{Component, ComponentId, RESIZE_STEP};
use crate::error::UserError;
use crate::models::User;
use crate::models::sort::{SortDir, SortState, sort_query};
use crate::utils::columns::{ColDef, ColumnWidths};
use crate::utils::pinning::{ColumnPinning, PinSide};
use crate::utils::symbols::{arrow, pin, triangle};
use crate::utils::text_ui::{TOP_TITLE_LEFT, TOP_TITLE_RIGHT, top_title_line, truncate};
use crate::widgets::paginator::Paginator;
use crate::widgets::shortcut::{Fragment, Shortcut};

/// The user grid: owns the shared sort cycle, derives the server query from
/// it, fetches the dataset and renders it paginated with pinning and
/// per-column resizing applied client-side.
pub struct UsersComponent {
    api: Option<Arc<Api>>,
    action_tx: Option<UnboundedSender<Action>>,

    store: Users,
    sort: SortState,
    pinning: ColumnPinning,
    widths: ColumnWidths,
    paginator: Paginator,
    /// display-order index of the selected column
    selected: usize,

    loading: bool,
    error: Option<UserError>,
    /// generation of the newest fetch; older responses are discarded
    req_seq: u64,
    throbber: ThrobberState,
}

impl Default for UsersComponent {
    fn default() -> Self {
        Self {
            api: None,
            action_tx: None,
            store: Users::default(),
            sort: SortState::default(),
            pinning: ColumnPinning::default(),
            widths: ColumnWidths::new(USER_COLS),
            paginator: Paginator::default(),
            selected: 0,
            loading: false,
            error: None,
            req_seq: 0,
            throbber: ThrobberState::default(),
        }
    }
}

impl UsersComponent {
    fn display_order(&self) -> Vec<&'static str> {
        self.pinning.display_order(&model_order())
    }

    fn selected_id(&self) -> Option<&'static str> {
        self.display_order().get(self.selected).copied()
    }

    /// Issue one request for the current sort query. Every call bumps the
    /// request generation, so an earlier in-flight response can no longer
    /// overwrite this one.
    fn fetch(&mut self) -> Result<()> {
        let api = Arc::clone(self.api.as_ref().unwrap());
        let tx = self.action_tx.as_ref().unwrap().clone();
        self.req_seq += 1;
        let seq = self.req_seq;
        self.loading = true;
        let query = sort_query(&self.sort.entries());
        debug!("Fetching users, seq={seq}, query={query:?}");

        tokio::spawn(async move {
            let result = api.get_users(&query).await;
            // always delivered, the loading flag clears on every exit path
            let _ = tx.send(Action::UsersLoaded { seq, result });
        });
        Ok(())
    }

    fn on_loaded(&mut self, seq: u64, result: Result<Vec<User>, ApiError>) {
        if seq != self.req_seq {
            debug!("Discarding stale users response, seq={seq}, current={}", self.req_seq);
            return;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                debug!("Loaded {} users", records.len());
                self.error = None;
                self.store.replace(records);
                self.paginator.length(self.store.len());
            }
            Err(e) => {
                warn!("Failed to load users: {e}");
                self.error = Some(UserError::from(("Fail to load users", e)));
            }
        }
    }

    fn advance_sort(&mut self) -> Option<Action> {
        let id = self.selected_id()?;
        let (_, col) = col_by_id(id)?;
        if !col.sortable {
            return None;
        }
        self.sort.advance(id);
        Some(Action::FetchUsers)
    }

    /// Toggle the pin side of the selected column; the selection follows the
    /// column to its new display position.
    fn toggle_pin(&mut self, side: PinSide) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.pinning.toggle(id, side);
        self.selected = self.display_order().iter().position(|c| *c == id).unwrap_or(0);
    }

    fn resize_selected(&mut self, delta: i16) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some((model_idx, col)) = col_by_id(id)
            && col.resizable
        {
            self.widths.resize(model_idx, delta);
        }
    }

    fn reset_selected_width(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some((model_idx, col)) = col_by_id(id)
            && col.resizable
        {
            self.widths.reset(model_idx);
        }
    }

    fn title_line(&self) -> Line<'_> {
        Line::from(vec![
            Span::raw(TOP_TITLE_LEFT),
            Span::raw("users ("),
            Span::styled(self.store.len().to_string(), Color::Cyan),
            Span::raw(")"),
            Span::raw(TOP_TITLE_RIGHT),
        ])
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let order = self.display_order();
        let cols: Vec<(usize, &ColDef<User>)> = order.iter().filter_map(|id| col_by_id(id)).collect();

        // scale abstract column units into the available cells
        let inner_width = area.width.saturating_sub(2) as u32;
        let total: u32 =
            cols.iter().map(|(mi, _)| self.widths.get(*mi) as u32).sum::<u32>().max(1);
        let cell_widths: Vec<u16> = cols
            .iter()
            .map(|(mi, _)| ((inner_width * self.widths.get(*mi) as u32) / total) as u16)
            .collect();

        let header = Row::new(cols.iter().enumerate().map(|(di, (_, col))| {
            let mut spans = vec![Span::raw(col.title)];
            if self.sort.column == Some(col.id)
                && let Some(dir) = self.sort.cycle.dir()
            {
                let marker = match dir {
                    SortDir::Asc => triangle::UP_SMALL,
                    SortDir::Desc => triangle::DOWN_SMALL,
                };
                spans.push(Span::raw(" "));
                spans.push(Span::styled(marker, Color::LightCyan));
            }
            match self.pinning.side(col.id) {
                Some(PinSide::Left) => spans.push(Span::styled(pin::LEFT, Color::Green)),
                Some(PinSide::Right) => spans.push(Span::styled(pin::RIGHT, Color::Green)),
                None => {}
            }

            let mut style = Style::default().add_modifier(Modifier::BOLD);
            if self.pinning.side(col.id).is_some() {
                style = style.fg(Color::Green);
            }
            if di == self.selected {
                style = style.fg(Color::LightCyan).add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(Line::from(spans)).style(style)
        }))
        .height(1);

        let bounds = self.paginator.page_bounds();
        let rows = self.store.page_slice(bounds).iter().map(|user| {
            Row::new(cols.iter().enumerate().map(|(di, (_, col))| {
                let value = (col.accessor)(user);
                let text = truncate(value.as_ref(), cell_widths[di].max(1) as usize);
                let mut cell = Cell::from(text);
                if self.pinning.side(col.id).is_some() {
                    cell = cell.style(Style::default().fg(Color::Green));
                }
                cell
            }))
        });

        let constraints: Vec<Constraint> =
            cell_widths.iter().map(|w| Constraint::Length(*w)).collect();
        let block =
            Block::bordered().border_type(BorderType::Rounded).title(self.title_line());
        let table = Table::new(rows, constraints).header(header).block(block).column_spacing(1);
        frame.render_widget(table, area);
    }

    fn render_loading(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(top_title_line("users", Style::default()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let throbber = Throbber::default()
            .label("Loading users…")
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        let line = Rect { height: 1.min(inner.height), ..inner };
        frame.render_stateful_widget(throbber, line, &mut self.throbber);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: &UserError) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(top_title_line(error.title, Style::default().fg(Color::Red)));
        let lines = vec![
            Line::raw(&*error.message),
            Line::raw(""),
            Line::from(vec![
                Span::raw("press "),
                Span::styled("r", Style::default().fg(Color::LightCyan)),
                Span::raw(" to retry"),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_paginator(&self, frame: &mut Frame, area: Rect) {
        if self.store.is_empty() {
            return;
        }
        let line = Line::from(vec![
            Span::raw("Page "),
            Span::styled(
                (self.paginator.page_index() + 1).to_string(),
                Style::default().fg(Color::LightCyan),
            ),
            Span::raw("/"),
            Span::styled(
                self.paginator.page_count().to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                " | {} rows | show {}",
                self.paginator.row_count(),
                self.paginator.page_size()
            )),
            Span::styled(
                match (self.paginator.can_prev(), self.paginator.can_next()) {
                    (true, true) => " | PgUp/PgDn",
                    (true, false) => " | PgUp",
                    (false, true) => " | PgDn",
                    (false, false) => "",
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(line, area);
    }
}

impl Component for UsersComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Users
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut::new(vec![
                Fragment::hl(arrow::LEFT),
                Fragment::raw("/"),
                Fragment::hl(arrow::RIGHT),
                Fragment::raw(" column"),
            ]),
            Shortcut::new(vec![Fragment::hl("s"), Fragment::raw(" sort")]),
            Shortcut::new(vec![
                Fragment::hl("["),
                Fragment::raw("/"),
                Fragment::hl("]"),
                Fragment::raw(" pin"),
            ]),
            Shortcut::new(vec![
                Fragment::hl("<"),
                Fragment::raw("/"),
                Fragment::hl(">"),
                Fragment::raw(" resize "),
                Fragment::hl("="),
                Fragment::raw(" reset"),
            ]),
            Shortcut::new(vec![
                Fragment::hl("PgUp"),
                Fragment::raw("/"),
                Fragment::hl("PgDn"),
                Fragment::raw(" page"),
            ]),
            Shortcut::new(vec![Fragment::hl("+"), Fragment::raw(" page size")]),
            Shortcut::new(vec![Fragment::hl("c"), Fragment::raw(" create")]),
            Shortcut::new(vec![Fragment::hl("r"), Fragment::raw(" reload")]),
        ]
    }

    fn init(&mut self, api: Arc<Api>) -> Result<()> {
        self.api = Some(api);
        self.fetch()?;
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1).min(USER_COLS.len().saturating_sub(1));
            }
            KeyCode::Char('s') => return Ok(self.advance_sort()),
            KeyCode::Char('[') => self.toggle_pin(PinSide::Left),
            KeyCode::Char(']') => self.toggle_pin(PinSide::Right),
            KeyCode::Char('<') => self.resize_selected(-RESIZE_STEP),
            KeyCode::Char('>') => self.resize_selected(RESIZE_STEP),
            KeyCode::Char('=') => self.reset_selected_width(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.paginator.next(),
            KeyCode::PageUp => self.paginator.prev(),
            KeyCode::Char('g') => self.paginator.first(),
            KeyCode::Char('G') => self.paginator.last(),
            KeyCode::Char('+') => self.paginator.cycle_page_size(),
            KeyCode::Char('c') => return Ok(Some(Action::OpenUserForm)),
            KeyCode::Char('r') => return Ok(Some(Action::FetchUsers)),
            _ => (),
        };

        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.throbber.calc_next();
                }
            }
            Action::FetchUsers => self.fetch()?,
            Action::UsersLoaded { seq, result } => self.on_loaded(seq, result),
            _ => {}
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);

        if self.loading {
            self.render_loading(frame, chunks[0]);
        } else if let Some(error) = self.error.clone() {
            self.render_error(frame, chunks[0], &error);
        } else {
            self.render_table(frame, chunks[0]);
        }
        self.render_paginator(frame, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    use super::*;
    use crate::api::tests::{api_for, sample_users, serve};
    use crate::models::sort::SortEntry;

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[tokio::test]
    async fn test_load_success_clears_loading() {
        let router = Router::new().route("/api/v1/users", get(|| async { Json(sample_users()) }));
        let api = Arc::new(api_for(serve(router).await));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut component = UsersComponent::default();
        component.register_action_handler(tx).unwrap();
        assert!(!component.loading);

        component.init(api).unwrap();
        assert!(component.loading);

        let action = rx.recv().await.unwrap();
        assert!(matches!(action, Action::UsersLoaded { seq: 1, .. }));
        component.update(action).unwrap();

        assert!(!component.loading);
        assert!(component.error.is_none());
        // both rows fit into one page at the default page size
        assert_eq!(component.store.page_slice(component.paginator.page_bounds()).len(), 2);
    }

    #[tokio::test]
    async fn test_load_error_clears_loading() {
        let router = Router::new()
            .route("/api/v1/users", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let api = Arc::new(api_for(serve(router).await));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut component = UsersComponent::default();
        component.register_action_handler(tx).unwrap();
        component.init(api).unwrap();
        assert!(component.loading);

        let action = rx.recv().await.unwrap();
        component.update(action).unwrap();

        assert!(!component.loading);
        assert!(component.store.is_empty());
        let error = component.error.as_ref().unwrap();
        assert_eq!(error.title, "Fail to load users");
        assert!(error.message.contains("500"), "got {:?}", error.message);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut component = UsersComponent::default();
        component.req_seq = 2;
        component.loading = true;

        component.on_loaded(1, Ok(sample_users()));
        assert!(component.loading, "stale response must not clear the newer fetch");
        assert!(component.store.is_empty());

        component.on_loaded(2, Ok(sample_users()));
        assert!(!component.loading);
        assert_eq!(component.store.len(), 2);
    }

    #[test]
    fn test_sort_key_cycles_and_fetches() {
        let mut component = UsersComponent::default();

        // fullName is selected initially; Asc, Desc, then cleared
        let action = component.handle_key_event(key('s')).unwrap();
        assert_eq!(action, Some(Action::FetchUsers));
        assert_eq!(component.sort.entries(), vec![SortEntry { id: "fullName", desc: false }]);

        component.handle_key_event(key('s')).unwrap();
        assert_eq!(component.sort.entries(), vec![SortEntry { id: "fullName", desc: true }]);

        let action = component.handle_key_event(key('s')).unwrap();
        assert_eq!(action, Some(Action::FetchUsers));
        assert!(component.sort.entries().is_empty());
    }

    #[test]
    fn test_sort_ignored_on_unsortable_column() {
        let mut component = UsersComponent::default();
        // move selection onto `age`
        for _ in 0..3 {
            component.handle_key_event(key('l')).unwrap();
        }
        assert_eq!(component.selected_id(), Some("age"));

        let action = component.handle_key_event(key('s')).unwrap();
        assert_eq!(action, None);
        assert!(component.sort.entries().is_empty());
    }

    #[test]
    fn test_pin_keys_follow_selection() {
        let mut component = UsersComponent::default();
        component.handle_key_event(key('l')).unwrap();
        assert_eq!(component.selected_id(), Some("firstName"));

        component.handle_key_event(key(']')).unwrap();
        assert_eq!(component.pinning.side("firstName"), Some(PinSide::Right));
        // the column moved to the far right, the selection went with it
        assert_eq!(component.selected, USER_COLS.len() - 1);
        assert_eq!(component.selected_id(), Some("firstName"));

        component.handle_key_event(key(']')).unwrap();
        assert_eq!(component.pinning.side("firstName"), None);
    }

    #[test]
    fn test_resize_keys_respect_resizable() {
        let mut component = UsersComponent::default();
        // fullName is resizable
        component.handle_key_event(key('>')).unwrap();
        assert_eq!(component.widths.get(0), 280);
        component.handle_key_event(key('=')).unwrap();
        assert_eq!(component.widths.get(0), 270);

        // firstName is not
        component.handle_key_event(key('l')).unwrap();
        component.handle_key_event(key('>')).unwrap();
        assert_eq!(component.widths.get(1), 200);
    }

    #[test]
    fn test_render_rows() {
        let mut component = UsersComponent::default();
        component.store.replace(sample_users());
        component.paginator.length(component.store.len());

        let mut terminal = Terminal::new(TestBackend::new(140, 12)).unwrap();
        terminal.draw(|f| component.draw(f, f.area()).unwrap()).unwrap();

        let content = format!("{:?}", terminal.backend().buffer());
        assert!(content.contains("Anders"), "missing first row");
        assert!(content.contains("Berg"), "missing second row");
        assert!(content.contains("Page 1/1"), "missing paginator line");
    }

    #[test]
    fn test_render_error_state() {
        let mut component = UsersComponent::default();
        component.error = Some(UserError::from(("Fail to load users", "boom")));

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal.draw(|f| component.draw(f, f.area()).unwrap()).unwrap();

        let content = format!("{:?}", terminal.backend().buffer());
        assert!(content.contains("boom"));
        assert!(content.contains("to retry"));
    }
}
