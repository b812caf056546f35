use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Span, Style};
use ratatui::symbols;

use crate::components::{Component, ComponentId};

pub struct HeaderComponent {
    endpoint: String,
}

impl HeaderComponent {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }

    fn title_widget(&self) -> Line<'_> {
        Line::from(vec![
            Span::styled(
                concat!(" ", env!("CARGO_PKG_NAME")),
                Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | User List", Style::default().fg(Color::Gray)),
        ])
    }

    fn endpoint_widget(&self) -> Line<'_> {
        Line::from(vec![
            Span::styled(
                format!("[ {} {} ", self.endpoint, symbols::DOT),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(
                format!("{} ", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::LightCyan),
            ),
            Span::styled("]", Style::default().fg(Color::Blue)),
        ])
        .alignment(Alignment::Right)
    }
}

impl Component for HeaderComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        frame.render_widget(self.title_widget(), chunks[0]);
        frame.render_widget(self.endpoint_widget(), chunks[1]);

        Ok(())
    }
}
