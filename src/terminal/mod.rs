//! Terminal output: a [`TextView`](crate::widget::TextView) backed by crossterm.

mod output;

pub use output::{TerminalConfig, TerminalView};
