//! Dashboard shell: header, sidebar, routed page, key dispatch.

use crate::chat::ChatPage;
use crate::navigation::{Route, SIDEBAR_LINKS};
use crate::pages::{render_landing, ComparePage, ResearchPage};
use compound_core::{DashboardConfig, HttpStockBackend, StockBackend};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::sync::Arc;
use std::time::Duration;

pub const APP_TITLE: &str = "Compound";
const SIDEBAR_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

pub struct DashboardApp {
    route: Route,
    focus: Focus,
    selected: usize,
    chat: ChatPage,
    research: ResearchPage,
    compare: ComparePage,
}

impl DashboardApp {
    pub fn new(backend: Arc<dyn StockBackend>, timeout: Option<Duration>) -> Self {
        Self {
            route: Route::Home,
            focus: Focus::Sidebar,
            selected: 0,
            chat: ChatPage::new(backend, timeout),
            research: ResearchPage::default(),
            compare: ComparePage::default(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        let backend: Arc<dyn StockBackend> = Arc::new(HttpStockBackend::from_config(config));
        Self::new(backend, config.request_timeout())
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn chat(&self) -> &ChatPage {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatPage {
        &mut self.chat
    }

    pub fn research(&self) -> &ResearchPage {
        &self.research
    }

    pub fn compare(&self) -> &ComparePage {
        &self.compare
    }

    /// Open a page and give it focus.
    pub fn open(&mut self, route: Route) {
        self.route = route;
        if let Some(index) = SIDEBAR_LINKS.iter().position(|l| l.route == route) {
            self.selected = index;
        }
        self.focus = Focus::Page;
        tracing::debug!(path = route.path(), "navigate");
    }

    /// Per-frame housekeeping: collects a finished activation.
    pub fn tick(&mut self) {
        self.chat.poll();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppControl {
        if key.kind != KeyEventKind::Press {
            return AppControl::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppControl::Quit;
        }
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Sidebar => Focus::Page,
                Focus::Page => Focus::Sidebar,
            };
            return AppControl::Continue;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Page => {
                match self.route {
                    Route::Home => {}
                    Route::Chat => self.chat.handle_key(key),
                    Route::Research => self.research.handle_key(key),
                    Route::Compare => self.compare.handle_key(key),
                }
                AppControl::Continue
            }
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> AppControl {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return AppControl::Quit,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(SIDEBAR_LINKS.len() - 1),
            KeyCode::Enter => self.open(SIDEBAR_LINKS[self.selected].route),
            KeyCode::Char('h') | KeyCode::Home => {
                self.route = Route::Home;
            }
            _ => {}
        }
        AppControl::Continue
    }

    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(f.area());

        render_header(f, rows[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[1]);
        self.render_sidebar(f, body[0]);

        let page_focused = self.focus == Focus::Page;
        match self.route {
            Route::Home => render_landing(f, body[1]),
            Route::Chat => self.chat.render(f, body[1], page_focused),
            Route::Research => self.research.render(f, body[1], page_focused),
            Route::Compare => self.compare.render(f, body[1], page_focused),
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(self.route.path(), Style::default().fg(Color::Cyan)),
            Span::styled(
                "  Tab focus · ↑/↓ Enter navigate · Ctrl+C quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(help, rows[2]);
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Sidebar;
        let items: Vec<ListItem> = SIDEBAR_LINKS
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let mut style = Style::default();
                if link.route == self.route {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if focused && i == self.selected {
                    style = style.bg(Color::Gray).fg(Color::Black);
                }
                let marker = if link.route == self.route { "▌" } else { " " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Blue)),
                    Span::styled(format!(" {}", link.label), style),
                ]))
            })
            .collect();

        let border = if focused { Color::Blue } else { Color::Gray };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(list, area);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(inner);
    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, columns[0]);
    let user = Paragraph::new(Span::styled("◉ account", Style::default().fg(Color::Gray)))
        .alignment(Alignment::Right);
    f.render_widget(user, columns[1]);
}
