//! The capability a widget must offer to be written into.

use std::io;

/// A text display element that grows by concatenation.
///
/// This is the only thing [`ViewWriter`](crate::ViewWriter) needs from a
/// widget. Implementations decide how appended text is shown; they must never
/// replace or clear existing content in response to `append`.
pub trait TextView {
    /// Append `text` to the displayed content.
    fn append(&mut self, text: &str) -> io::Result<()>;
}

impl TextView for String {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

impl<T: TextView + ?Sized> TextView for Box<T> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        (**self).append(text)
    }
}
