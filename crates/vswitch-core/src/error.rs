//! Error types for the forwarding core.

use thiserror::Error;

/// Errors produced while decoding a raw frame.
///
/// Decoding is best-effort: a malformed frame is reported, never
/// panicked on, and the event loop skips it and continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The buffer is too short to hold the header being read.
    #[error("truncated frame: {len} bytes, need at least {needed}")]
    Truncated {
        /// Actual buffer length.
        len: usize,
        /// Minimum length required for the attempted read.
        needed: usize,
    },
}

impl FrameError {
    /// Creates a truncation error.
    pub fn truncated(len: usize, needed: usize) -> Self {
        FrameError::Truncated { len, needed }
    }
}
