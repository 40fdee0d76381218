//! Chat page: the one page with behavior. Hosts the stock session flow.
//!
//! The request runs on a worker thread with its own current-thread runtime;
//! the UI loop calls [`ChatPage::poll`] every tick, so the spinner keeps moving
//! while `Pending`. Pressing Esc while pending aborts the request.

use crate::input::{input_box, TextField};
use compound_core::{dispatch, ActivationError, SessionPhase, SessionState, StockBackend};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub const CHAT_TITLE: &str = "Stock Analysis Chat";
pub const STOCK_PLACEHOLDER: &str = "Enter Stock Name (e.g., AAPL)";
pub const QUESTION_PLACEHOLDER: &str = "Ask about the stock...";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

type AttemptResult = Result<(), ActivationError>;

/// A request currently on the worker thread.
struct InFlight {
    rx: Receiver<AttemptResult>,
    abort: Option<oneshot::Sender<()>>,
}

pub struct ChatPage {
    session: SessionState,
    backend: Arc<dyn StockBackend>,
    timeout: Option<Duration>,
    in_flight: Option<InFlight>,
    spinner: usize,
    /// Ready-stage question box. Nothing is ever sent.
    question: TextField,
}

impl ChatPage {
    pub fn new(backend: Arc<dyn StockBackend>, timeout: Option<Duration>) -> Self {
        Self {
            session: SessionState::new(),
            backend,
            timeout,
            in_flight: None,
            spinner: 0,
            question: TextField::new(QUESTION_PLACEHOLDER),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn question(&self) -> &TextField {
        &self.question
    }

    /// "Process Stock". Starts one attempt unless the guard rejects it.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.session.begin() else {
            tracing::debug!(phase = ?self.session.phase(), "process stock ignored");
            return false;
        };
        tracing::info!(stock = %request.stock_name, "processing stock");

        let (tx, rx) = mpsc::channel();
        let (abort_tx, abort_rx) = oneshot::channel::<()>();
        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;

        std::thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(dispatch(backend.as_ref(), &request, timeout, async move {
                    // A dropped sender is not an abort.
                    if abort_rx.await.is_err() {
                        std::future::pending::<()>().await;
                    }
                })),
                Err(e) => Err(ActivationError::Transport(e.to_string())),
            };
            let _ = tx.send(result);
        });

        self.in_flight = Some(InFlight {
            rx,
            abort: Some(abort_tx),
        });
        self.spinner = 0;
        true
    }

    /// Ask the worker to give up. Returns false when nothing is pending.
    pub fn abort(&mut self) -> bool {
        let Some(sender) = self.in_flight.as_mut().and_then(|f| f.abort.take()) else {
            return false;
        };
        tracing::info!(stock = %self.session.identifier(), "abort requested");
        let _ = sender.send(());
        true
    }

    /// Collect the worker's result if it is in. Returns true when the attempt settled.
    /// A worker that vanished without answering settles as an unknown error.
    pub fn poll(&mut self) -> bool {
        let Some(flight) = &self.in_flight else {
            return false;
        };
        let outcome = match flight.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                self.spinner = self.spinner.wrapping_add(1);
                return false;
            }
            Err(TryRecvError::Disconnected) => Err(ActivationError::Transport(String::new())),
        };
        self.in_flight = None;

        match &outcome {
            Ok(()) => tracing::info!(stock = %self.session.identifier(), "stock ready for chat"),
            Err(e) => tracing::warn!(stock = %self.session.identifier(), error = %e, "stock processing failed"),
        }
        self.session.settle(outcome);
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.session.phase() {
            SessionPhase::Idle => match key.code {
                KeyCode::Enter => {
                    self.submit();
                }
                KeyCode::Backspace => {
                    self.session.pop_char();
                }
                KeyCode::Char(c) => {
                    self.session.push_char(c);
                }
                _ => {}
            },
            SessionPhase::Pending => {
                if key.code == KeyCode::Esc {
                    self.abort();
                }
            }
            SessionPhase::Ready => match key.code {
                KeyCode::Backspace => self.question.pop(),
                KeyCode::Char(c) => self.question.push(c),
                _ => {}
            },
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", CHAT_TITLE),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let banner_height = if self.session.error().is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(banner_height), Constraint::Min(5)])
            .split(inner);

        if let Some(error) = self.session.error() {
            let banner = Paragraph::new(error)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                );
            f.render_widget(banner, chunks[0]);
        }

        match self.session.phase() {
            SessionPhase::Idle => self.render_input_stage(f, chunks[1], focused),
            SessionPhase::Pending => self.render_loading_stage(f, chunks[1]),
            SessionPhase::Ready => self.render_chat_stage(f, chunks[1], focused),
        }
    }

    fn render_input_stage(&self, f: &mut Frame, area: Rect, focused: bool) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        f.render_widget(
            input_box(self.session.identifier(), STOCK_PLACEHOLDER, focused),
            rows[0],
        );
        let button = Paragraph::new(Line::from(vec![
            Span::styled(
                " Process Stock ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(button, rows[2]);
    }

    fn render_loading_stage(&self, f: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.spinner % SPINNER.len()];
        let lines = vec![
            Line::from(Span::styled(spinner, Style::default().fg(Color::Blue))),
            Line::from(""),
            Line::from(format!("Processing {}...", self.session.identifier())),
            Line::from(Span::styled(
                "This may take up to 10 seconds",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Esc to abort",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_chat_stage(&self, f: &mut Frame, area: Rect, focused: bool) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(3)])
            .split(area);

        let messages = Paragraph::new(vec![
            Line::from(Span::styled(
                " User message ",
                Style::default().fg(Color::Blue).bg(Color::LightBlue),
            ))
            .alignment(Alignment::Right),
            Line::from(""),
            Line::from(Span::styled(
                " AI response ",
                Style::default().fg(Color::Green).bg(Color::LightGreen),
            ))
            .alignment(Alignment::Left),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(messages, rows[0]);

        let composer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(10)])
            .split(rows[1]);
        f.render_widget(self.question.widget(focused), composer[0]);
        let send = Paragraph::new(Span::styled(
            "Send",
            Style::default().fg(Color::White).bg(Color::Blue),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(send, composer[1]);
    }
}
