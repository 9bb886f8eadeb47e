//! Pipe Demo: Streams stdin into a terminal view from a worker thread.
//!
//! A worker thread copies stdin through a `ViewWriter` pointed at a
//! `UiQueue`; the main thread owns the `TerminalView` and pumps queued text
//! into it, the way a UI thread would own its widgets.
//!
//! Try: `cat Cargo.toml | cargo run --example pipe`

use crossterm::style::Color;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use view_writer::widget::ui_queue;
use view_writer::{TerminalConfig, TerminalView, ViewWriter};

fn main() -> io::Result<()> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("pipe.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let (queue, pump) = ui_queue::channel();
    // The writer only holds a weak handle; `queue` must outlive the worker.
    let queue = Arc::new(Mutex::new(queue));

    let worker = {
        let writer = ViewWriter::attach(&queue);
        thread::Builder::new()
            .name("pipe-reader".to_string())
            .spawn(move || -> io::Result<u64> {
                let copied = io::copy(&mut io::stdin().lock(), &mut &writer)?;
                writer.close();
                Ok(copied)
            })?
    };
    let mut view = TerminalView::new(
        io::stdout(),
        TerminalConfig {
            fg: Some(Color::Cyan),
            ..TerminalConfig::default()
        },
    );

    while !worker.is_finished() {
        pump.pump_timeout(&mut view, Duration::from_millis(16))?;
    }
    pump.pump(&mut view)?;

    let copied = worker
        .join()
        .map_err(|_| io::Error::other("reader thread panicked"))??;
    log::info!("copied {copied} bytes");
    drop(queue);
    Ok(())
}
