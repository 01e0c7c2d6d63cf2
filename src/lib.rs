//! # loom-term
//!
//! The core runtime of a retained-mode terminal UI framework: a cell
//! buffer with a differential renderer, a VT100/xterm input decoder, an
//! FPS-governed tick loop, and a z-ordered window manager.
//!
//! This crate is the engine room, not a widget toolkit — there is no
//! layout system or component model here. What it gives you is the thing
//! those would be built on: a grid of styled cells, a way to turn two
//! grids into a minimal stream of ANSI bytes, a way to turn raw stdin
//! bytes into typed [`Event`]s, and a loop that paces both to a target
//! frame rate.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use loom_term::app::{App, AppConfig};
//! use loom_term::render::Cell;
//!
//! fn main() -> loom_term::Result<()> {
//!     let mut app = App::new(AppConfig::new().title("hello"))?;
//!     let mut count = 0;
//!
//!     app.on_event(move |event| {
//!         !matches!(event, loom_term::Event::Key { char: Some('q'), .. })
//!     });
//!     app.on_render(move |buf| {
//!         buf.set_string(0, 0, &format!("count: {count}"), Default::default(), None);
//!         count += 1;
//!     });
//!
//!     app.run()
//! }
//! ```
//!
//! ## Layers
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`geometry`] | `Position`, `Size`, `Rect` and rect-merging helpers |
//! | [`style`] | `Color`, `Modifier` bits, combined `Style` |
//! | [`render`] | `Cell`, `Buffer`, the diff algorithm, the ANSI renderer, the terminal driver |
//! | [`event`] | `Event`, the VT100 decoder, the non-blocking reader |
//! | [`tick`] | the FPS governor and both the blocking and cooperative tick loops |
//! | [`window`] | the z-ordered window manager |
//! | [`app`] | the application-facing API tying the above together |
//!
//! Raw-mode setup, `SIGWINCH` handling, and `TIOCGWINSZ` queries are Unix
//! only; this crate does not support Windows consoles.
//!
//! ## Error handling
//!
//! See [`error`] for the taxonomy. Decode failures never propagate as
//! `Result` errors — they surface as [`Event::Unknown`] and the decoder
//! keeps running.
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, [`log_debug!`], [`log_warn!`], and
//! [`log_error!`] forward to `tracing`'s macros of the same severity;
//! without it they compile to nothing.

pub mod app;
pub mod core;
pub mod error;
pub mod runtime;
pub mod text;

pub use core::constants;
pub use error::{Error, Result};
pub use runtime::{event, geometry, render, style, tick, window};
pub use runtime::event::Event;

/// Crate version, including a dev-build git SHA suffix when built outside
/// a release (`LOOM_TERM_RELEASE` unset). See `build.rs`.
pub const VERSION: &str = env!("LOOM_TERM_VERSION");

/// Full git commit hash this build was compiled from, empty for release
/// builds or when git was unavailable at build time.
pub const GIT_SHA: &str = env!("GIT_SHA");

/// Whether this build was compiled from an uncommitted or unreleased
/// checkout (`LOOM_TERM_RELEASE` unset and git was available).
pub const IS_DEV_BUILD: &str = env!("LOOM_TERM_IS_DEV");

/// Re-exports covering the common path through the crate: `App` and its
/// config, the cell/buffer/style types, events, and the window manager.
pub mod prelude {
    pub use crate::app::{App, AppConfig};
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
    pub use crate::geometry::{Position, Rect, Size};
    pub use crate::render::{Buffer, Cell};
    pub use crate::style::{Color, Modifier, Style};
    pub use crate::window::{Border, BorderChars, Window, WindowId, WindowManager};
}
