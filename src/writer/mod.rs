//! Writer: Character-stream adapter over a text view.
//!
//! [`ViewWriter`] accepts characters, strings, slices of either, and raw
//! UTF-8 bytes, and appends each write to the [`TextView`](crate::widget::TextView)
//! it points at. It implements both [`std::fmt::Write`] and [`std::io::Write`],
//! for owned writers and shared references, so it plugs into `write!`,
//! `io::copy` and anything else expecting a sink.
//!
//! # State
//!
//! ```text
//! ┌──────┐  close()  ┌────────┐
//! │ Open │ ────────▶ │ Closed │ ◀─┐ close()
//! └──────┘           └────────┘ ──┘
//! ```
//!
//! Writes and flushes succeed only while open.

mod error;
mod view_writer;

pub use error::{Result, WriterError};
pub use view_writer::{ViewWriter, WriterLock};
