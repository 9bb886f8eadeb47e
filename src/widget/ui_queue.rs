//! UI queue: Hand appended text to the thread that owns the widget.
//!
//! Most toolkits only allow their widgets to be mutated from one thread.
//! A [`UiQueue`] is a [`TextView`] that can live anywhere; it forwards each
//! append over a channel, and the owning thread applies the text with
//! [`UiPump::pump`] from its event loop.
//!
//! ```text
//! ┌──────────────┐  write   ┌────────────┐   String   ┌─────────┐  append  ┌────────┐
//! │ Worker Thread│ ───────▶ │ ViewWriter │ ─────────▶ │ UiPump  │ ───────▶ │ Widget │
//! └──────────────┘          │ (UiQueue)  │  channel   │(UI loop)│          └────────┘
//!                           └────────────┘            └─────────┘
//! ```

use std::io;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

use super::traits::TextView;

/// Create a connected queue and pump.
pub fn channel() -> (UiQueue, UiPump) {
    // Unbounded: writers must not block on a busy UI thread, and text is never dropped.
    let (tx, rx) = unbounded();
    (UiQueue { tx }, UiPump { rx })
}

/// Sending half: a [`TextView`] that queues text for the UI thread.
#[derive(Debug, Clone)]
pub struct UiQueue {
    tx: Sender<String>,
}

impl TextView for UiQueue {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.tx
            .send(text.to_owned())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "UI pump disconnected"))
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct UiPump {
    rx: Receiver<String>,
}

impl UiPump {
    /// Apply all queued text to `view` without blocking.
    ///
    /// Returns the number of chunks applied.
    pub fn pump<V: TextView + ?Sized>(&self, view: &mut V) -> io::Result<usize> {
        let mut applied = 0;
        while let Ok(text) = self.rx.try_recv() {
            view.append(&text)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Wait up to `timeout` for text, then apply everything queued.
    ///
    /// Returns `Ok(0)` on timeout or when every queue has been dropped.
    pub fn pump_timeout<V: TextView + ?Sized>(
        &self,
        view: &mut V,
        timeout: Duration,
    ) -> io::Result<usize> {
        match self.rx.recv_timeout(timeout) {
            Ok(text) => {
                view.append(&text)?;
                Ok(1 + self.pump(view)?)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => Ok(0),
        }
    }

    /// Get a reference to the text receiver.
    ///
    /// Use this with `select!` in event-driven loops.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<String> {
        &self.rx
    }
}
