use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};
use unicode_width::UnicodeWidthStr;

use crate::format::{DOWN_GLYPH, IDLE_GLYPH, UP_GLYPH};
use super::DisplaySink;

/// One-row status area drawn inline below the shell prompt
pub struct StatusBar {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    released: bool,
}

impl StatusBar {
    pub fn create() -> Result<Self> {
        // Raw mode so single key presses reach the input handler
        enable_raw_mode()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = match Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(1),
            },
        ) {
            Ok(t) => t,
            Err(e) => {
                disable_raw_mode()?;
                return Err(e.into());
            }
        };
        Ok(Self {
            terminal,
            released: false,
        })
    }
}

impl DisplaySink for StatusBar {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.terminal.draw(|f| draw_status(f, text))?;
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.terminal.clear()?;
        disable_raw_mode()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for StatusBar {
    fn drop(&mut self) {
        // Last resort if the loop bailed out with an error
        let _ = self.destroy();
    }
}

/// Style the label: "↓" green, "↑" magenta, idle glyph dimmed
fn label_spans(text: &str) -> Vec<Span<'static>> {
    if text == IDLE_GLYPH {
        return vec![Span::styled(
            text.to_string(),
            Style::default().fg(Color::DarkGray),
        )];
    }

    let mut spans = Vec::new();
    for (i, token) in text.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = match token {
            DOWN_GLYPH => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            UP_GLYPH => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        spans.push(Span::styled(token.to_string(), style));
    }
    spans
}

/// Draw the label right-aligned in the first row of the frame
pub fn draw_status(f: &mut Frame, text: &str) {
    let area = f.area();
    let width = (UnicodeWidthStr::width(text) as u16).min(area.width);
    let label_area = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height.min(1),
    };
    f.render_widget(Paragraph::new(Line::from(label_spans(text))), label_area);
}
