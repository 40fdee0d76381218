//! Static pages: landing, research, compare. Inputs accept typing; nothing
//! submits or fetches.

use crate::input::TextField;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const GREETING: &str = "Hi I am Manas";
pub const RESEARCH_TITLE: &str = "Research Report";
pub const COMPARE_TITLE: &str = "Compare Stocks";

fn page_block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", title),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

pub fn render_landing(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    let greeting = Paragraph::new(Line::from(Span::styled(
        GREETING,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(greeting, rows[1]);
}

pub struct ResearchPage {
    search: TextField,
}

impl Default for ResearchPage {
    fn default() -> Self {
        Self {
            search: TextField::new("Search for a stock..."),
        }
    }
}

impl ResearchPage {
    pub fn search(&self) -> &TextField {
        &self.search
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.search.push(c),
            KeyCode::Backspace => self.search.pop(),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let block = page_block(RESEARCH_TITLE);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);
        f.render_widget(self.search.widget(focused), rows[0]);
        f.render_widget(Block::default().borders(Borders::ALL), rows[1]);
    }
}

/// Which of the two compare inputs receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareSlot {
    #[default]
    First,
    Second,
}

pub struct ComparePage {
    first: TextField,
    second: TextField,
    active: CompareSlot,
}

impl Default for ComparePage {
    fn default() -> Self {
        Self {
            first: TextField::new("Enter first stock..."),
            second: TextField::new("Enter second stock..."),
            active: CompareSlot::First,
        }
    }
}

impl ComparePage {
    pub fn first(&self) -> &TextField {
        &self.first
    }

    pub fn second(&self) -> &TextField {
        &self.second
    }

    pub fn active(&self) -> CompareSlot {
        self.active
    }

    fn active_field(&mut self) -> &mut TextField {
        match self.active {
            CompareSlot::First => &mut self.first,
            CompareSlot::Second => &mut self.second,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Left => self.active = CompareSlot::First,
            KeyCode::Down | KeyCode::Right => self.active = CompareSlot::Second,
            KeyCode::Char(c) => self.active_field().push(c),
            KeyCode::Backspace => self.active_field().pop(),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let block = page_block(COMPARE_TITLE);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        f.render_widget(
            self.first
                .widget(focused && self.active == CompareSlot::First),
            columns[0],
        );
        f.render_widget(
            self.second
                .widget(focused && self.active == CompareSlot::Second),
            columns[1],
        );
        f.render_widget(Block::default().borders(Borders::ALL), rows[1]);
    }
}
