use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::action::Action;
use crate::api::Api;
use crate::components::footer_component::FooterComponent;
use crate::components::header_component::HeaderComponent;
use crate::components::user_form_component::UserFormComponent;
use crate::components::users_component::UsersComponent;
use crate::components::{Component, ComponentId};

pub struct RootComponent {
    api: Option<Arc<Api>>,
    components: HashMap<ComponentId, Box<dyn Component>>,
    action_tx: Option<UnboundedSender<Action>>,
    popup: Option<ComponentId>,
}

impl RootComponent {
    pub fn new(endpoint: String) -> Self {
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(HeaderComponent::new(endpoint)),
            Box::new(FooterComponent::default()),
        ];
        let components = components.into_iter().map(|c| (c.id(), c)).collect::<HashMap<_, _>>();
        Self { api: None, components, action_tx: None, popup: None }
    }

    fn get_or_init(&mut self, id: ComponentId) -> &mut Box<dyn Component> {
        self.components.entry(id).or_insert_with(|| {
            let mut c: Box<dyn Component> = match id {
                ComponentId::Users => Box::new(UsersComponent::default()),
                ComponentId::UserForm => Box::new(UserFormComponent::default()),
                _ => panic!("unsupported component {:?}", id),
            };
            c.register_action_handler(self.action_tx.as_ref().unwrap().clone()).unwrap();
            c.init(Arc::clone(self.api.as_ref().unwrap())).unwrap();
            c
        })
    }

    fn send_shortcuts(&mut self, id: ComponentId) -> Result<()> {
        let shortcuts = self.get_or_init(id).shortcuts();
        self.action_tx.as_ref().unwrap().send(Action::Shortcuts(shortcuts))?;
        Ok(())
    }
}

impl Component for RootComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Root
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn init(&mut self, api: Arc<Api>) -> Result<()> {
        self.api = Some(api);
        // the grid starts fetching right away
        self.get_or_init(ComponentId::Users);
        self.send_shortcuts(ComponentId::Users)?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        // popup first: it consumes every key while open
        if let Some(popup) = self.popup {
            return self.get_or_init(popup).handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Some(Action::Suspend));
            }
            _ => {}
        }
        debug!("Try handling key event: key={:?}", key);
        self.get_or_init(ComponentId::Users).handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenUserForm => {
                self.popup = Some(ComponentId::UserForm);
                self.send_shortcuts(ComponentId::UserForm)?;
            }
            Action::CloseModal => {
                self.popup = None;
                self.send_shortcuts(ComponentId::Users)?;
            }
            _ => {}
        }
        // propagate action to all components
        for component in self.components.values_mut() {
            if let Some(next) = component.update(action.clone())? {
                self.action_tx.as_ref().unwrap().send(next)?;
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        self.get_or_init(ComponentId::Header).draw(frame, chunks[0])?;
        self.get_or_init(ComponentId::Users).draw(frame, chunks[1])?;
        self.popup.map(|c| self.get_or_init(c).draw(frame, chunks[1])).transpose()?;
        self.get_or_init(ComponentId::Footer).draw(frame, chunks[2])?;
        Ok(())
    }
}
