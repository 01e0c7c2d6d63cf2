//! Error types for the terminal runtime
//!
//! # Error Handling Guidelines
//!
//! | Situation | What to return |
//! |---|---|
//! | Raw-mode / alternate-screen setup failed | `Error::Terminal`, propagate before raw mode is enabled |
//! | A write to stdout fails during setup | `Error::Terminal` |
//! | A byte sequence from the input stream fails to decode | not an `Error` at all — emit `Event::Unknown` and continue (§7) |
//! | A user-registered event/render handler returns an error | `Error::EventHandler`, converted to a "stop" and unwound after cleanup |
//! | Anything else reaching the application boundary | `Error::Other` via `anyhow` |
//!
//! Cleanup (disabling raw mode, leaving the alternate screen, restoring
//! `termios`) always runs on the way out, even when this error type is what's
//! propagating — see [`crate::render::terminal::TerminalDriver`]'s `Drop` impl.

/// The runtime's error type.
///
/// `InputError` from the specification's taxonomy deliberately has no
/// variant here: per the decoder's non-fatal failure semantics it never
/// propagates through `Result`, it is carried on `Event::Unknown` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fatal: raw-mode setup, alternate-screen setup, or a setup-time stdout
    /// write failed. Cleanup still runs; this surfaces to the caller.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Originates in user code (an event or render handler). Converted to a
    /// tick-loop "stop" and re-raised after cleanup completes.
    #[error("event handler error: {0}")]
    EventHandler(#[source] anyhow::Error),

    /// I/O failure from the underlying file descriptor or syscalls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected error that doesn't fit the taxonomy above.
    #[error("unexpected error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Construct a fatal terminal error from a message.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }

    /// Wrap a user handler's error.
    pub fn event_handler(err: impl Into<anyhow::Error>) -> Self {
        Self::EventHandler(err.into())
    }

    /// True for errors that originated in a user-registered handler, which
    /// the tick loop converts to a graceful stop rather than a crash.
    pub fn is_event_handler(&self) -> bool {
        matches!(self, Self::EventHandler(_))
    }
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { tracing::error!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}
