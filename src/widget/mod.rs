//! Widgets a [`ViewWriter`](crate::ViewWriter) can write into.
//!
//! Any type implementing [`TextView`] is a valid target. This module provides
//! the in-memory targets:
//!
//! - [`ScrollBuffer`]: line-oriented scrollback with optional soft wrap.
//! - [`UiQueue`]: forwards text to the thread that owns the real widget.
//!
//! # Example
//!
//! ```rust,ignore
//! use view_writer::widget::ScrollBuffer;
//!
//! let mut scroll = ScrollBuffer::new(1000);
//! scroll.push_text("Hello, ");
//! scroll.push_text("world!\n");
//! ```

mod scroll_buffer;
mod traits;
pub mod ui_queue;

pub use scroll_buffer::{ScrollBuffer, ScrollConfig, TextLine};
pub use traits::TextView;
pub use ui_queue::{UiPump, UiQueue};
