//! Error types for gabbro
//!
//! Two kinds of failure flow through here: errors the binding itself detects
//! (acquisition, callback protocol, library loading) and errors raised by the
//! native library, either captured synchronously by an error scope or
//! delivered asynchronously through the uncaptured-error callback into a
//! per-device [`ErrorSink`].

use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;

/// Result type alias for gabbro operations
pub type Result<T> = std::result::Result<T, GabbroError>;

/// Kind of error reported by the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    OutOfMemory,
    DeviceLost,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::OutOfMemory => "out of memory",
            Self::DeviceLost => "device lost",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Main error type for gabbro
#[derive(Error, Debug)]
pub enum GabbroError {
    /// The native library raised an error, attributed to the call it was
    /// captured around (or drained from the device sink).
    #[error("wgpu {kind} error: {message}")]
    Native { kind: ErrorKind, message: String },

    /// A factory returned a null handle without raising a scoped error.
    #[error("failed to acquire {resource}")]
    Acquisition { resource: &'static str },

    #[error("no suitable GPU adapter found: {message}")]
    RequestAdapterFailed { message: String },

    #[error("failed to create device: {message}")]
    RequestDeviceFailed { message: String },

    /// A callback documented as synchronous had not fired when the native
    /// call returned.
    #[error("native callback for {operation} did not resolve before the call returned")]
    CallbackNotResolved { operation: &'static str },

    #[error("buffer mapping failed: {message}")]
    BufferMap { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "dlopen")]
    #[error("failed to load wgpu_native: {0}")]
    LibraryLoad(#[from] libloading::Error),

    #[cfg(feature = "dlopen")]
    #[error("wgpu_native at {path}: sha256 mismatch (expected {expected}, got {actual})")]
    LibraryHashMismatch {
        path: std::path::PathBuf,
        expected: String,
        actual: String,
    },
}

impl GabbroError {
    pub fn native(kind: ErrorKind, message: impl fmt::Display) -> Self {
        Self::Native {
            kind,
            message: message.to_string(),
        }
    }

    pub fn validation(message: impl fmt::Display) -> Self {
        Self::native(ErrorKind::Validation, message)
    }

    /// Kind of native error, if this error came from the native library.
    pub fn native_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Native { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Depth-1 mailbox for uncaptured native errors, one per device.
///
/// The uncaptured-error trampoline stores into it from whatever thread the
/// native library calls on; the owning thread drains it opportunistically
/// after native calls. A second store while an error is still pending means
/// an error was produced and never drained, which is a programming error in
/// the calling code and is fatal.
pub(crate) struct ErrorSink {
    slot: Mutex<Option<GabbroError>>,
}

impl ErrorSink {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Stores an uncaptured error. Panics if one is already pending.
    pub(crate) fn store(&self, err: GabbroError) {
        let mut slot = self.slot.lock();
        if let Some(pending) = slot.take() {
            log::error!("uncaptured wgpu error displaced before it was drained: {pending}");
            panic!(
                "two uncaptured wgpu errors without a drain in between: \
                 first: {pending}; second: {err}"
            );
        }
        *slot = Some(err);
    }

    /// Takes the pending error, if any.
    pub(crate) fn drain(&self) -> Option<GabbroError> {
        self.slot.lock().take()
    }

    /// Logs anything still pending. Called on device teardown so the last
    /// error of a dying device is not silently lost.
    pub(crate) fn report_undrained(&self) {
        if let Some(err) = self.drain() {
            log::error!("wgpu error pending at device teardown: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_roundtrip() {
        let sink = ErrorSink::new();
        assert!(sink.drain().is_none());
        sink.store(GabbroError::validation("binding 0 missing"));
        let err = sink.drain().expect("stored error");
        assert_eq!(err.native_kind(), Some(ErrorKind::Validation));
        assert!(sink.drain().is_none());
    }

    #[test]
    fn sink_accepts_store_after_drain() {
        let sink = ErrorSink::new();
        sink.store(GabbroError::validation("first"));
        sink.drain();
        sink.store(GabbroError::validation("second"));
        assert!(sink.drain().is_some());
    }

    #[test]
    #[should_panic(expected = "two uncaptured wgpu errors")]
    fn sink_overflow_is_fatal() {
        let sink = ErrorSink::new();
        sink.store(GabbroError::validation("first"));
        sink.store(GabbroError::validation("second"));
    }

    #[test]
    fn error_messages_name_the_failure() {
        let err = GabbroError::Acquisition { resource: "Buffer" };
        assert_eq!(err.to_string(), "failed to acquire Buffer");
        let err = GabbroError::native(ErrorKind::OutOfMemory, "allocation of 16 GiB failed");
        assert_eq!(
            err.to_string(),
            "wgpu out of memory error: allocation of 16 GiB failed"
        );
    }
}
