//! Single-line text inputs.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Uncontrolled input: accepts typing, nothing reads it back.
#[derive(Debug, Clone)]
pub struct TextField {
    value: String,
    placeholder: &'static str,
}

impl TextField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            placeholder,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn widget(&self, focused: bool) -> Paragraph<'_> {
        input_box(&self.value, self.placeholder, focused)
    }
}

/// Bordered input showing `value`, or a dimmed placeholder when empty.
pub fn input_box<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = if value.is_empty() {
        Line::from(Span::styled(
            placeholder,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if focused {
        Line::from(vec![Span::raw(value), Span::styled("▏", border)])
    } else {
        Line::from(Span::raw(value))
    };
    Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(border))
}
