//! Scroll buffer: In-memory scrollback of appended text.
//!
//! Text is stored as lines. A `'\n'` ends a line (hard break); when a wrap
//! width is configured, text that would overflow the width continues on a
//! soft-wrapped line. Old lines are discarded once capacity is reached.

use std::collections::VecDeque;
use std::io;

use unicode_width::UnicodeWidthChar;

use super::traits::TextView;

/// Configuration for a [`ScrollBuffer`].
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Maximum lines to keep in scrollback.
    pub max_lines: usize,
    /// Display width at which lines soft-wrap, `None` to never wrap.
    pub wrap_width: Option<usize>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_lines: 10_000,
            wrap_width: None,
        }
    }
}

/// A line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    /// The text content of the line, without its terminator.
    content: String,
    /// Whether this line continues the previous one after a soft wrap.
    wrapped: bool,
    /// Display width of `content` in terminal columns.
    width: usize,
}

impl TextLine {
    const fn continuation(wrapped: bool) -> Self {
        Self {
            content: String::new(),
            wrapped,
            width: 0,
        }
    }

    /// The text content of the line, without its terminator.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this line continues the previous one after a soft wrap.
    pub const fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Display width of the line in terminal columns.
    pub const fn width(&self) -> usize {
        self.width
    }
}

/// Ring buffer of lines with scrollback.
#[derive(Debug)]
pub struct ScrollBuffer {
    /// Lines stored in the buffer.
    lines: VecDeque<TextLine>,
    /// Configuration.
    config: ScrollConfig,
    /// Current scroll offset from the bottom (0 = at bottom).
    scroll_offset: usize,
}

impl ScrollBuffer {
    /// Create a new scroll buffer with the given capacity.
    pub fn new(max_lines: usize) -> Self {
        Self::with_config(ScrollConfig {
            max_lines,
            ..ScrollConfig::default()
        })
    }

    /// Create a new scroll buffer with custom configuration.
    pub fn with_config(config: ScrollConfig) -> Self {
        let config = ScrollConfig {
            max_lines: config.max_lines.max(1),
            ..config
        };
        let mut lines = VecDeque::with_capacity(config.max_lines.min(1024));
        lines.push_back(TextLine::default());

        Self {
            lines,
            config,
            scroll_offset: 0,
        }
    }

    /// Get the total number of lines in the buffer.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: the buffer keeps at least one (possibly empty) line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line being appended to.
    pub fn current_line(&self) -> &TextLine {
        // Invariant: never empty.
        &self.lines[self.lines.len() - 1]
    }

    fn current_line_mut(&mut self) -> &mut TextLine {
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// Get a line by index from the top of the buffer.
    pub fn get(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    /// Append text, splitting on newlines and wrapping as configured.
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.newline(false);
                continue;
            }

            let char_width = ch.width().unwrap_or(0);
            if let Some(limit) = self.config.wrap_width {
                let line = self.current_line();
                if line.width + char_width > limit && !line.content.is_empty() {
                    self.newline(true);
                }
            }

            let line = self.current_line_mut();
            line.content.push(ch);
            line.width += char_width;
        }
    }

    /// Start a new line.
    fn newline(&mut self, wrapped: bool) {
        while self.lines.len() >= self.config.max_lines {
            self.lines.pop_front();
        }

        self.lines.push_back(TextLine::continuation(wrapped));

        // Keep a detached view pinned to the same content.
        if self.scroll_offset > 0 {
            self.scroll_up(1);
        }
    }

    /// Rebuild the retained text: hard breaks become `'\n'`, soft wraps join.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 && !line.wrapped {
                out.push('\n');
            }
            out.push_str(&line.content);
        }
        out
    }

    /// Get visible lines for a given viewport height, accounting for scroll offset.
    pub fn visible_lines(&self, viewport_height: usize) -> impl Iterator<Item = &TextLine> {
        let total = self.lines.len();
        let end = total.saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(viewport_height);

        self.lines.range(start..end)
    }

    /// Scroll up by the given number of lines.
    pub fn scroll_up(&mut self, lines: usize) {
        let max_offset = self.lines.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
    }

    /// Scroll down by the given number of lines.
    pub const fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scroll to the bottom (latest content).
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Check if we're scrolled to the bottom.
    pub const fn at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    /// Clear all content.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push_back(TextLine::default());
        self.scroll_offset = 0;
    }
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::with_config(ScrollConfig::default())
    }
}

impl TextView for ScrollBuffer {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.push_text(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_buffer_new() {
        let buf = ScrollBuffer::new(100);
        assert_eq!(buf.len(), 1);
        assert!(buf.current_line().content.is_empty());
    }

    #[test]
    fn test_scroll_buffer_append() {
        let mut buf = ScrollBuffer::new(100);
        buf.push_text("Hello");
        buf.push_text(", world!");
        assert_eq!(buf.current_line().content, "Hello, world!");
        assert_eq!(buf.current_line().width(), 13);
    }

    #[test]
    fn test_scroll_buffer_newline() {
        let mut buf = ScrollBuffer::new(100);
        buf.push_text("Line 1\nLine 2");
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0).unwrap().content, "Line 1");
        assert_eq!(buf.text(), "Line 1\nLine 2");
    }

    #[test]
    fn test_scroll_buffer_capacity() {
        let mut buf = ScrollBuffer::new(3);
        buf.push_text("Line 1\nLine 2\nLine 3\nLine 4");

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(0).unwrap().content, "Line 2");
    }

    #[test]
    fn test_scroll_buffer_wrap() {
        let mut buf = ScrollBuffer::with_config(ScrollConfig {
            wrap_width: Some(4),
            ..ScrollConfig::default()
        });
        buf.push_text("abcdef\ngh");

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(0).unwrap().content, "abcd");
        assert!(buf.get(1).unwrap().wrapped);
        assert_eq!(buf.get(1).unwrap().content, "ef");
        assert!(!buf.get(2).unwrap().wrapped);
        // Soft wraps don't alter the reconstructed text.
        assert_eq!(buf.text(), "abcdef\ngh");
    }

    #[test]
    fn test_scroll_buffer_wide_chars_wrap() {
        let mut buf = ScrollBuffer::with_config(ScrollConfig {
            wrap_width: Some(3),
            ..ScrollConfig::default()
        });
        buf.push_text("日本語");

        assert_eq!(buf.get(0).unwrap().content, "日");
        assert_eq!(buf.get(0).unwrap().width(), 2);
        assert_eq!(buf.text(), "日本語");
    }

    #[test]
    fn test_scroll_buffer_scroll() {
        let mut buf = ScrollBuffer::new(100);
        for i in 0..10 {
            buf.push_text(&format!("Line {i}\n"));
        }

        assert!(buf.at_bottom());

        buf.scroll_up(3);
        assert!(!buf.at_bottom());
        assert_eq!(buf.scroll_offset, 3);
        let top = buf.visible_lines(2).next().unwrap();
        assert_eq!(top.content, "Line 6");

        // New content doesn't move a detached view.
        buf.push_text("more\n");
        assert_eq!(buf.scroll_offset, 4);

        buf.scroll_down(1);
        assert_eq!(buf.scroll_offset, 3);

        buf.scroll_to_bottom();
        assert!(buf.at_bottom());
    }

    #[test]
    fn test_scroll_buffer_scroll_clamps() {
        let mut buf = ScrollBuffer::new(100);
        buf.push_text("a\nb\nc");

        buf.scroll_up(1);
        buf.scroll_up(usize::MAX);
        assert_eq!(buf.scroll_offset, 2);
        assert_eq!(buf.visible_lines(5).next().unwrap().content(), "a");
    }

    #[test]
    fn test_text_line_accessors() {
        let mut buf = ScrollBuffer::with_config(ScrollConfig {
            wrap_width: Some(2),
            ..ScrollConfig::default()
        });
        buf.push_text("abc");

        let first = buf.get(0).unwrap();
        assert_eq!(first.content(), "ab");
        assert_eq!(first.width(), 2);
        assert!(!first.is_wrapped());
        assert!(buf.current_line().is_wrapped());
        assert_eq!(buf.current_line().content(), "c");
    }

    #[test]
    fn test_scroll_buffer_clear() {
        let mut buf = ScrollBuffer::default();
        buf.append("a\nb").unwrap();
        buf.clear();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.text(), "");
    }
}
