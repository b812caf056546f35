use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Line, Span};

use crate::action::Action;
use crate::components::{Component, ComponentId};
use crate::widgets::shortcut::{Fragment, Shortcut};

pub struct FooterComponent {
    shortcuts: Vec<Shortcut>,
}

fn default_shortcuts() -> Vec<Shortcut> {
    vec![Shortcut::new(vec![Fragment::hl("q"), Fragment::raw(" quit")])]
}

impl Default for FooterComponent {
    fn default() -> Self {
        Self { shortcuts: default_shortcuts() }
    }
}

impl FooterComponent {
    fn shortcuts_widget(&self) -> Line<'_> {
        let mut spans = vec![];
        for shortcut in &self.shortcuts {
            spans.push(Span::raw(" "));
            spans.extend(shortcut.spans(None));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }
}

impl Component for FooterComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Footer
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if let Action::Shortcuts(shortcuts) = action {
            let mut sc = default_shortcuts();
            sc.extend(shortcuts);
            self.shortcuts = sc;
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(self.shortcuts_widget(), area);
        Ok(())
    }
}
