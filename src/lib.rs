//! # View Writer
//!
//! A character-stream writer that appends into text display widgets.
//!
//! The writer is a thin, thread-safe adapter: each write checks that the
//! writer is still open, converts its input to a string and appends it to
//! the target view. Nothing is buffered, formatted or laid out.
//!
//! ## Core Concepts
//!
//! - **`TextView`**: the one capability a widget needs, `append(text)`
//! - **`ViewWriter`**: weak handle to a view plus a lock and a closed flag
//! - **`UiQueue`**: hands appended text to the thread that owns the widget
//! - **`TerminalView`**: prints appended text to the terminal via crossterm
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use view_writer::{ScrollBuffer, ViewWriter};
//!
//! let view = Arc::new(Mutex::new(ScrollBuffer::new(1000)));
//! let writer = ViewWriter::attach(&view);
//!
//! writer.write_str("Hello, ")?;
//! writer.write_str("world!\n")?;
//! writer.close();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod terminal;
pub mod widget;
pub mod writer;

// Re-exports for convenience
pub use terminal::{TerminalConfig, TerminalView};
pub use widget::{ScrollBuffer, ScrollConfig, TextView, UiPump, UiQueue};
pub use writer::{Result, ViewWriter, WriterError, WriterLock};
