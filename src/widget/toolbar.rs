//! Navigation row above the page: open, previous, next, page indicator

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Open,
    PreviousPage,
    NextPage,
}

impl ToolbarAction {
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarAction::Open => "Open file",
            ToolbarAction::PreviousPage => "<",
            ToolbarAction::NextPage => ">",
        }
    }
}

const BUTTONS: [ToolbarAction; 3] = [
    ToolbarAction::Open,
    ToolbarAction::PreviousPage,
    ToolbarAction::NextPage,
];

/// Button row. Remembers where each button was drawn for hit testing.
#[derive(Debug, Default)]
pub struct Toolbar {
    buttons: Vec<(ToolbarAction, Rect)>,
}

impl Toolbar {
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the buttons and `indicator` (e.g. "page 2 / 10") into `area`
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, indicator: &str) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(13),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(0),
            ])
            .split(area);

        self.buttons.clear();
        for (action, rect) in BUTTONS.iter().zip(chunks.iter()) {
            Paragraph::new(action.label())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Gray)),
                )
                .render(*rect, buf);
            self.buttons.push((*action, *rect));
        }

        Paragraph::new(indicator)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
            .render(chunks[3], buf);
    }

    /// Button under the given terminal cell, if any
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ToolbarAction> {
        let pos = Position::new(column, row);
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(action, _)| *action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_toolbar() -> (Toolbar, Buffer) {
        let area = Rect::new(0, 0, 60, Toolbar::HEIGHT);
        let mut buf = Buffer::empty(area);
        let mut toolbar = Toolbar::new();
        toolbar.render(area, &mut buf, "page 1 / 3");
        (toolbar, buf)
    }

    #[test]
    fn buttons_are_hit_tested_by_cell() {
        let (toolbar, _) = rendered_toolbar();
        assert_eq!(toolbar.hit_test(2, 1), Some(ToolbarAction::Open));
        assert_eq!(toolbar.hit_test(15, 1), Some(ToolbarAction::PreviousPage));
        assert_eq!(toolbar.hit_test(20, 0), Some(ToolbarAction::NextPage));
        assert_eq!(toolbar.hit_test(40, 1), None);
        assert_eq!(toolbar.hit_test(2, 3), None);
    }

    #[test]
    fn labels_and_indicator_are_drawn() {
        let (_, buf) = rendered_toolbar();
        let row: String = (0..buf.area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(row.contains("Open file"));
        assert!(row.contains('<'));
        assert!(row.contains('>'));
        assert!(row.trim_end().ends_with("page 1 / 3"));
    }
}
