//! Cell buffer, differential renderer, cursor tracking, and the terminal
//! driver that owns raw-mode setup and ANSI output.

pub mod buffer;
pub mod cell;
pub mod cursor;
pub mod diff;
pub mod renderer;
pub mod terminal;

pub use buffer::{Buffer, BufferError};
pub use cell::Cell;
pub use cursor::{CursorManager, CursorStyle};
pub use diff::{diff as diff_buffers, Change};
pub use renderer::Renderer;
pub use terminal::TerminalDriver;
