//! `TerminalView`: Print appended text straight to a terminal.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Stdout, Write};

use crate::widget::TextView;

/// Configuration for a [`TerminalView`].
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Foreground color for appended text, `None` for the terminal default.
    pub fg: Option<Color>,
    /// Whether every append is flushed immediately.
    pub flush_each_append: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            fg: None,
            flush_each_append: true,
        }
    }
}

/// A [`TextView`] whose display is the terminal itself.
///
/// Text is emitted as crossterm commands onto the wrapped writer, so the
/// "displayed content" only ever grows.
#[derive(Debug)]
pub struct TerminalView<W: Write = Stdout> {
    out: W,
    config: TerminalConfig,
}

impl TerminalView<Stdout> {
    /// Print to standard output with default configuration.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), TerminalConfig::default())
    }
}

impl<W: Write> TerminalView<W> {
    /// Create a terminal view over any writer.
    pub const fn new(out: W, config: TerminalConfig) -> Self {
        Self { out, config }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Get the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the view, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextView for TerminalView<W> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        match self.config.fg {
            Some(color) => queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)?,
            None => queue!(self.out, Print(text))?,
        }

        if self.config.flush_each_append {
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_append() {
        let mut view = TerminalView::new(Vec::new(), TerminalConfig::default());
        view.append("Hello, ").unwrap();
        view.append("").unwrap();
        view.append("world").unwrap();
        assert_eq!(view.into_inner(), b"Hello, world");
    }

    #[test]
    fn test_colored_append() {
        let config = TerminalConfig {
            fg: Some(Color::Rgb { r: 1, g: 2, b: 3 }),
            flush_each_append: false,
        };
        let mut view = TerminalView::new(Vec::new(), config);
        view.append("hi").unwrap();

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[38;2;1;2;3m"));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[0m"));
    }
}
