//! Errors reported by [`ViewWriter`](super::ViewWriter).

use std::io;

use thiserror::Error;

/// Result alias used throughout the writer.
pub type Result<T, E = WriterError> = std::result::Result<T, E>;

/// Failures of a writer operation.
///
/// Every variant is returned before the view is touched, except
/// [`WriterError::View`] which carries the view's own append failure.
#[derive(Debug, Error)]
pub enum WriterError {
    /// A required argument was missing at construction.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The writer has been closed.
    #[error("writer closed")]
    StreamClosed,

    /// Slice bounds fall outside the source sequence.
    #[error("range {offset}+{len} out of bounds for length {available}")]
    IndexOutOfRange {
        /// Requested start, in characters.
        offset: usize,
        /// Requested length, in characters.
        len: usize,
        /// Characters actually available.
        available: usize,
    },

    /// Bytes written through `io::Write` were not valid UTF-8.
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence, counting pending bytes.
        offset: usize,
    },

    /// The view was dropped while the writer still pointed at it.
    #[error("view no longer exists")]
    ViewDropped,

    /// The view rejected the append.
    #[error("view append failed: {0}")]
    View(#[from] io::Error),
}

impl From<WriterError> for io::Error {
    fn from(err: WriterError) -> Self {
        let kind = match err {
            WriterError::View(inner) => return inner,
            WriterError::InvalidArgument(_) | WriterError::IndexOutOfRange { .. } => {
                io::ErrorKind::InvalidInput
            }
            WriterError::StreamClosed => io::ErrorKind::BrokenPipe,
            WriterError::InvalidUtf8 { .. } => io::ErrorKind::InvalidData,
            WriterError::ViewDropped => io::ErrorKind::NotConnected,
        };
        Self::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_kinds() {
        let closed: io::Error = WriterError::StreamClosed.into();
        assert_eq!(closed.kind(), io::ErrorKind::BrokenPipe);

        let range: io::Error = WriterError::IndexOutOfRange {
            offset: 3,
            len: 2,
            available: 4,
        }
        .into();
        assert_eq!(range.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(range.to_string(), "range 3+2 out of bounds for length 4");

        let gone: io::Error = WriterError::ViewDropped.into();
        assert_eq!(gone.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn test_view_error_passes_through() {
        let inner = io::Error::new(io::ErrorKind::WouldBlock, "busy");
        let err: io::Error = WriterError::from(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert_eq!(err.to_string(), "busy");
    }
}
