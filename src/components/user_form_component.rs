use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Color, Line, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};
use tui_input::{Input, InputRequest};

use crate::action::Action;
use crate::api::{Api, ApiError};
use crate::components::{Component, ComponentId};
use crate::error::UserError;
use crate::models::{NewUser, User};
use crate::utils::validate::{Rule, first_error};
use crate::widgets::shortcut::{Fragment, Shortcut};

const FIRST_NAME: usize = 0;
const LAST_NAME: usize = 1;
const AGE: usize = 2;
const JOB: usize = 3;
const PET: usize = 4;

struct Field {
    label: &'static str,
    rules: &'static [Rule],
    input: Input,
    error: Option<String>,
    touched: bool,
}

impl Field {
    fn new(label: &'static str, rules: &'static [Rule]) -> Self {
        Self { label, rules, input: Input::default(), error: None, touched: false }
    }

    fn validate(&mut self) {
        self.error = first_error(self.rules, self.input.value());
    }

    fn value(&self) -> &str {
        self.input.value()
    }
}

fn make_fields() -> Vec<Field> {
    vec![
        Field::new("First name", &[Rule::Required, Rule::MinLength(2), Rule::MaxLength(50)]),
        Field::new("Last name", &[Rule::Required, Rule::MaxLength(50)]),
        Field::new("Age", &[Rule::Required, Rule::Integer]),
        Field::new("Job", &[Rule::MaxLength(50)]),
        Field::new("Pet", &[Rule::MaxLength(50)]),
    ]
}

/// Modal create-user form. Validates on change, posts on submit and asks for
/// a row-list refresh once the server confirms.
pub struct UserFormComponent {
    api: Option<Arc<Api>>,
    action_tx: Option<UnboundedSender<Action>>,

    fields: Vec<Field>,
    focused: usize,
    submitting: bool,
    submit_error: Option<UserError>,
}

impl Default for UserFormComponent {
    fn default() -> Self {
        Self {
            api: None,
            action_tx: None,
            fields: make_fields(),
            focused: 0,
            submitting: false,
            submit_error: None,
        }
    }
}

impl UserFormComponent {
    fn reset(&mut self) {
        self.fields = make_fields();
        self.focused = 0;
        self.submitting = false;
        self.submit_error = None;
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    fn input_request(&self, key: KeyEvent) -> Option<InputRequest> {
        use KeyCode::*;
        use tui_input::InputRequest::*;

        match (key.code, key.modifiers) {
            (Backspace, KeyModifiers::NONE) => Some(DeletePrevChar),
            (Delete, KeyModifiers::NONE) => Some(DeleteNextChar),
            (Left, KeyModifiers::NONE) => Some(GoToPrevChar),
            (Left, KeyModifiers::CONTROL) => Some(GoToPrevWord),
            (Right, KeyModifiers::NONE) => Some(GoToNextChar),
            (Right, KeyModifiers::CONTROL) => Some(GoToNextWord),
            (Char('w'), KeyModifiers::CONTROL)
            | (Backspace, KeyModifiers::META)
            | (Backspace, KeyModifiers::ALT) => Some(DeletePrevWord),
            (Delete, KeyModifiers::CONTROL) => Some(DeleteNextWord),
            (Home, KeyModifiers::NONE) => Some(GoToStart),
            (End, KeyModifiers::NONE) => Some(GoToEnd),
            (Char(c), KeyModifiers::NONE) => Some(InsertChar(c)),
            (Char(c), KeyModifiers::SHIFT) => Some(InsertChar(c)),
            (_, _) => None,
        }
    }

    fn submit(&mut self) -> Result<Option<Action>> {
        for field in &mut self.fields {
            field.touched = true;
            field.validate();
        }
        if self.fields.iter().any(|f| f.error.is_some()) {
            return Ok(None);
        }

        // age parses, the Integer rule passed
        let age: u32 = self.fields[AGE].value().trim().parse().unwrap_or_default();
        let new_user = NewUser {
            first_name: self.fields[FIRST_NAME].value().trim().to_owned(),
            last_name: self.fields[LAST_NAME].value().trim().to_owned(),
            age,
            job: self.fields[JOB].value().trim().to_owned(),
            pet: self.fields[PET].value().trim().to_owned(),
        };

        let api = Arc::clone(self.api.as_ref().unwrap());
        let tx = self.action_tx.as_ref().unwrap().clone();
        self.submitting = true;
        self.submit_error = None;
        info!("Creating user `{} {}`", new_user.first_name, new_user.last_name);

        tokio::spawn(async move {
            let result = api.create_user(&new_user).await.map(Box::new);
            let _ = tx.send(Action::UserCreated(result));
        });
        Ok(None)
    }

    fn on_created(&mut self, result: Result<Box<User>, ApiError>) -> Option<Action> {
        self.submitting = false;
        match result {
            Ok(user) => {
                info!("Created user `{}`", user.full_name());
                // refresh the list behind the closing modal
                let _ = self.action_tx.as_ref().unwrap().send(Action::FetchUsers);
                Some(Action::CloseModal)
            }
            Err(e) => {
                warn!("Failed to create user: {e}");
                self.submit_error = Some(UserError::from(("Fail to create user", e)));
                None
            }
        }
    }

    fn message_line(&self) -> Line<'_> {
        if self.submitting {
            return Line::styled("Submitting…", Style::default().fg(Color::LightBlue));
        }
        if let Some(error) = &self.submit_error {
            return Line::styled(&*error.message, Style::default().fg(Color::Red));
        }
        let field = &self.fields[self.focused];
        match (&field.error, field.touched) {
            (Some(error), true) => Line::styled(error.as_str(), Style::default().fg(Color::Red)),
            _ => Line::raw(""),
        }
    }

    fn modal_area(&self, area: Rect) -> Rect {
        let height = (self.fields.len() as u16 * 3 + 3).min(area.height);
        let width = 48.min(area.width.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect { x, y, width, height }
    }
}

impl Component for UserFormComponent {
    fn id(&self) -> ComponentId {
        ComponentId::UserForm
    }

    fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut::new(vec![Fragment::hl("Enter"), Fragment::raw(" submit")]),
            Shortcut::new(vec![Fragment::hl("Esc"), Fragment::raw(" cancel")]),
            Shortcut::new(vec![
                Fragment::hl("Tab"),
                Fragment::raw("/"),
                Fragment::hl("S-Tab"),
                Fragment::raw(" field"),
            ]),
        ]
    }

    fn init(&mut self, api: Arc<Api>) -> Result<()> {
        self.api = Some(api);
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Quit));
            }
            KeyCode::Esc => return Ok(Some(Action::CloseModal)),
            _ if self.submitting => {}
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => {
                if let Some(req) = self.input_request(key) {
                    let field = &mut self.fields[self.focused];
                    let _ = field.input.handle(req);
                    field.touched = true;
                    field.validate();
                }
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenUserForm => self.reset(),
            Action::UserCreated(result) => return Ok(self.on_created(result)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let modal = self.modal_area(area);
        frame.render_widget(Clear, modal);

        let block =
            Block::bordered().border_type(BorderType::Rounded).title("Create user");
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let mut constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let is_focused = i == self.focused;
            let has_error = field.touched && field.error.is_some();
            let style = if has_error {
                Style::default().fg(Color::Red)
            } else if is_focused {
                Style::default().fg(Color::LightBlue)
            } else {
                Style::default()
            };

            let chunk = chunks[i];
            let width = chunk.width.max(3) - 3;
            let scroll = field.input.visual_scroll(width as usize);
            let input_block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(field.label);
            let input = Paragraph::new(field.value())
                .scroll((0, scroll as u16))
                .style(style)
                .block(input_block);
            frame.render_widget(input, chunk);

            if is_focused && !self.submitting {
                let x = field.input.visual_cursor().max(scroll) - scroll + 1;
                frame.set_cursor_position((chunk.x + x as u16, chunk.y + 1));
            }
        }
        frame.render_widget(self.message_line(), chunks[self.fields.len()]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::sync::mpsc;

    use super::*;
    use crate::api::tests::{api_for, sample_users, serve};

    fn type_str(component: &mut UserFormComponent, text: &str) {
        for c in text.chars() {
            component.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_validation_blocks_submit() {
        let mut component = UserFormComponent::default();
        // no api wired: a submit that passed validation would panic
        let action = component.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert!(!component.submitting);
        assert_eq!(
            component.fields[FIRST_NAME].error.as_deref(),
            Some("This field is required")
        );
    }

    #[test]
    fn test_validate_on_change() {
        let mut component = UserFormComponent::default();
        type_str(&mut component, "A");
        assert_eq!(
            component.fields[FIRST_NAME].error.as_deref(),
            Some("Must be at least 2 characters")
        );
        type_str(&mut component, "da");
        assert_eq!(component.fields[FIRST_NAME].error, None);

        // move to age and type junk
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut component, "4x");
        assert_eq!(component.fields[AGE].error.as_deref(), Some("Must be a whole number"));
    }

    #[test]
    fn test_esc_closes() {
        let mut component = UserFormComponent::default();
        let action = component.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }

    #[tokio::test]
    async fn test_submit_success_refreshes_list() {
        let router = Router::new().route(
            "/api/v1/users",
            post(|| async { (StatusCode::CREATED, Json(sample_users().remove(0))) }),
        );
        let api = Arc::new(api_for(serve(router).await));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut component = UserFormComponent::default();
        component.register_action_handler(tx).unwrap();
        component.init(api).unwrap();

        type_str(&mut component, "Ada");
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut component, "Lovelace");
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut component, "36");
        component.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(component.submitting);

        let created = rx.recv().await.unwrap();
        assert!(matches!(created, Action::UserCreated(Ok(_))));
        let action = component.update(created).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
        assert!(!component.submitting);
        // the refresh request went through the channel
        assert_eq!(rx.recv().await, Some(Action::FetchUsers));
    }

    #[tokio::test]
    async fn test_submit_error_keeps_modal_open() {
        let router = Router::new()
            .route("/api/v1/users", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let api = Arc::new(api_for(serve(router).await));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut component = UserFormComponent::default();
        component.register_action_handler(tx).unwrap();
        component.init(api).unwrap();

        type_str(&mut component, "Ada");
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut component, "Lovelace");
        component.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut component, "36");
        component.handle_key_event(key(KeyCode::Enter)).unwrap();

        let created = rx.recv().await.unwrap();
        let action = component.update(created).unwrap();
        assert_eq!(action, None);
        assert!(!component.submitting);
        assert!(component.submit_error.is_some());
    }

    #[test]
    fn test_open_resets_state() {
        let mut component = UserFormComponent::default();
        type_str(&mut component, "junk");
        component.update(Action::OpenUserForm).unwrap();
        assert_eq!(component.fields[FIRST_NAME].value(), "");
        assert_eq!(component.fields[FIRST_NAME].error, None);
    }
}
