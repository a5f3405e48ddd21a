//! Diagnostic traces attached to error records.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// A shared, immutable backtrace.
///
/// Wrapping errors hand the same `Trace` down the chain, so the frames
/// always point at where the innermost failure was first recorded.
/// Whether frames are captured at all follows `RUST_BACKTRACE` /
/// `RUST_LIB_BACKTRACE`.
#[derive(Clone)]
pub struct Trace(Arc<Backtrace>);

impl Trace {
    #[inline(never)]
    pub fn capture() -> Self {
        Trace(Arc::new(Backtrace::capture()))
    }

    pub fn disabled() -> Self {
        Trace(Arc::new(Backtrace::disabled()))
    }

    pub fn status(&self) -> BacktraceStatus {
        self.0.status()
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.0
    }

    /// Whether both traces were recorded by the same capture.
    pub fn ptr_eq(&self, other: &Trace) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
