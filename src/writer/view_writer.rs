//! `ViewWriter`: A character-stream writer that appends to a [`TextView`].

use std::fmt;
use std::io;
use std::ops::Range;
use std::str;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use log::{debug, trace, warn};

use super::error::{Result, WriterError};
use crate::widget::TextView;

/// Mutual exclusion shared by one or more writers.
///
/// Cloning a `WriterLock` shares the same lock. Writers built with clones of
/// one lock never run operations at the same time.
#[derive(Debug, Clone, Default)]
pub struct WriterLock(Arc<Mutex<()>>);

impl WriterLock {
    /// Create a new, unshared lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether two handles refer to the same lock.
    pub fn same_lock(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        lock_recover(&self.0, "writer lock")
    }
}

/// Lock a mutex, taking over the data if a previous holder panicked.
fn lock_recover<'a, T: ?Sized>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("{what} poisoned by a panicking holder, recovering");
        poisoned.into_inner()
    })
}

#[derive(Debug, Default)]
struct WriterState {
    /// Terminal once set.
    closed: bool,
    /// Incomplete UTF-8 sequence left over from the last byte write.
    pending: Vec<u8>,
}

/// A writer that appends everything written to it onto a text view.
///
/// The writer holds a weak reference to the view: it neither keeps the view
/// alive nor manages it. Every operation runs under the writer's
/// [`WriterLock`], so a `close` racing a write either lets the write finish
/// first or makes it fail with [`WriterError::StreamClosed`]. A failed
/// operation never touches the view.
///
/// The view is mutated on the calling thread. If the view belongs to a
/// toolkit that only allows mutation from its UI thread, point the writer at
/// a [`UiQueue`](crate::widget::UiQueue) and pump it from that thread.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::{Arc, Mutex};
/// use view_writer::ViewWriter;
///
/// let view = Arc::new(Mutex::new(String::from("A")));
/// let writer = ViewWriter::attach(&view);
/// writer.write_str("B")?;
/// writer.write_char('C')?;
/// writer.close();
/// assert!(writer.write_str("D").is_err());
/// assert_eq!(*view.lock().unwrap(), "ABC");
/// ```
pub struct ViewWriter<V: ?Sized> {
    lock: WriterLock,
    state: Mutex<WriterState>,
    view: Weak<Mutex<V>>,
}

impl<V: TextView + ?Sized> ViewWriter<V> {
    /// Create a writer for `view` with a lock of its own.
    ///
    /// Fails with [`WriterError::InvalidArgument`] if `view` points at nothing.
    pub fn new(view: Weak<Mutex<V>>) -> Result<Self> {
        Self::with_lock(view, WriterLock::new())
    }

    /// Create a writer for `view` that synchronizes on `lock`.
    ///
    /// Fails with [`WriterError::InvalidArgument`] if `view` points at nothing.
    pub fn with_lock(view: Weak<Mutex<V>>, lock: WriterLock) -> Result<Self> {
        if view.strong_count() == 0 {
            return Err(WriterError::InvalidArgument("view"));
        }
        Ok(Self {
            lock,
            state: Mutex::default(),
            view,
        })
    }

    /// Create a writer for a live view.
    pub fn attach(view: &Arc<Mutex<V>>) -> Self {
        Self {
            lock: WriterLock::new(),
            state: Mutex::default(),
            view: Arc::downgrade(view),
        }
    }

    /// Get the lock this writer synchronizes on.
    pub const fn lock(&self) -> &WriterLock {
        &self.lock
    }

    /// Check whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        let _guard = self.lock.acquire();
        self.state().closed
    }

    /// Close the writer. Idempotent.
    pub fn close(&self) {
        let _guard = self.lock.acquire();
        let mut state = self.state();
        if state.closed {
            return;
        }
        if !state.pending.is_empty() {
            warn!(
                "discarding {} undecoded bytes on close",
                state.pending.len()
            );
            state.pending.clear();
        }
        state.closed = true;
        debug!("view writer closed");
    }

    /// Nothing is buffered on the text side; this only reports a closed writer.
    pub fn flush(&self) -> Result<()> {
        self.with_open(|_| Ok(()))
    }

    /// Append a single character.
    pub fn write_char(&self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }

    /// Append all of `chars`.
    pub fn write_chars(&self, chars: &[char]) -> Result<()> {
        self.with_open(|_| self.append(&chars.iter().collect::<String>()))
    }

    /// Append `len` characters of `chars` starting at `offset`.
    pub fn write_chars_range(&self, chars: &[char], offset: usize, len: usize) -> Result<()> {
        self.with_open(|_| {
            let range = char_range(chars.len(), offset, len)?;
            self.append(&chars[range].iter().collect::<String>())
        })
    }

    /// Append `s`.
    pub fn write_str(&self, s: &str) -> Result<()> {
        self.with_open(|_| self.append(s))
    }

    /// Append `len` characters of `s` starting at character `offset`.
    ///
    /// Bounds count `char`s, not bytes, so a range can never split a character.
    pub fn write_str_range(&self, s: &str, offset: usize, len: usize) -> Result<()> {
        self.with_open(|_| self.append(str_range(s, offset, len)?))
    }

    /// Decode `bytes` as UTF-8 and append the complete characters.
    ///
    /// A trailing incomplete sequence is held back and completed by the next
    /// call. If the next call cannot complete it, the held-back bytes are
    /// dropped along with the error. Returns the number of bytes consumed,
    /// which is always all of them.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<usize> {
        self.with_open(|state| {
            let joined;
            let input = if state.pending.is_empty() {
                bytes
            } else {
                joined = [state.pending.as_slice(), bytes].concat();
                joined.as_slice()
            };

            let (text, rest) = match split_utf8(input) {
                Ok(split) => split,
                Err(WriterError::InvalidUtf8 { offset }) if offset < state.pending.len() => {
                    // The held-back bytes can never complete; drop them so later writes recover.
                    warn!("discarding {} undecodable pending bytes", state.pending.len());
                    state.pending.clear();
                    return Err(WriterError::InvalidUtf8 { offset });
                }
                Err(err) => return Err(err),
            };
            if !text.is_empty() {
                self.append(text)?;
            }
            state.pending = rest.to_vec();
            Ok(bytes.len())
        })
    }

    /// Run `op` under the lock if the writer is still open.
    fn with_open<T>(&self, op: impl FnOnce(&mut WriterState) -> Result<T>) -> Result<T> {
        let _guard = self.lock.acquire();
        let mut state = self.state();
        if state.closed {
            return Err(WriterError::StreamClosed);
        }
        op(&mut state)
    }

    fn state(&self) -> MutexGuard<'_, WriterState> {
        lock_recover(&self.state, "writer state")
    }

    /// The single primitive every write goes through. Caller holds the lock.
    fn append(&self, text: &str) -> Result<()> {
        let view = self.view.upgrade().ok_or(WriterError::ViewDropped)?;
        trace!("appending {} bytes to view", text.len());
        lock_recover(&*view, "view").append(text)?;
        Ok(())
    }
}

fn char_range(available: usize, offset: usize, len: usize) -> Result<Range<usize>> {
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(offset..end),
        _ => Err(WriterError::IndexOutOfRange {
            offset,
            len,
            available,
        }),
    }
}

fn str_range(s: &str, offset: usize, len: usize) -> Result<&str> {
    let out_of_range = || WriterError::IndexOutOfRange {
        offset,
        len,
        available: s.chars().count(),
    };
    offset.checked_add(len).ok_or_else(out_of_range)?;

    // Byte position of every char boundary, including the end of the string.
    let mut boundaries = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()));
    let start = boundaries.nth(offset).ok_or_else(out_of_range)?;
    let end = match len {
        0 => start,
        _ => boundaries.nth(len - 1).ok_or_else(out_of_range)?,
    };
    Ok(&s[start..end])
}

/// Split `bytes` into its valid UTF-8 prefix and an incomplete trailing sequence.
fn split_utf8(bytes: &[u8]) -> Result<(&str, &[u8])> {
    match str::from_utf8(bytes) {
        Ok(text) => Ok((text, &bytes[bytes.len()..])),
        Err(err) if err.error_len().is_none() => {
            let (valid, rest) = bytes.split_at(err.valid_up_to());
            let text = str::from_utf8(valid).map_err(|e| WriterError::InvalidUtf8 {
                offset: e.valid_up_to(),
            })?;
            Ok((text, rest))
        }
        Err(err) => Err(WriterError::InvalidUtf8 {
            offset: err.valid_up_to(),
        }),
    }
}

impl<V: ?Sized> fmt::Debug for ViewWriter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewWriter")
            .field("lock", &self.lock)
            .field("view_alive", &(self.view.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl<V: TextView + ?Sized> fmt::Write for &ViewWriter<V> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ViewWriter::write_str(*self, s).map_err(|err| {
            debug!("formatted write failed: {err}");
            fmt::Error
        })
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        ViewWriter::write_char(*self, c).map_err(|err| {
            debug!("formatted write failed: {err}");
            fmt::Error
        })
    }
}

impl<V: TextView + ?Sized> fmt::Write for ViewWriter<V> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        fmt::Write::write_str(&mut &*self, s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        fmt::Write::write_char(&mut &*self, c)
    }
}

impl<V: TextView + ?Sized> io::Write for &ViewWriter<V> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ViewWriter::write_bytes(*self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(ViewWriter::flush(*self)?)
    }
}

impl<V: TextView + ?Sized> io::Write for ViewWriter<V> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut &*self)
    }
}
