//! Common constants used throughout the runtime
//!
//! This module centralizes magic numbers and commonly used values to improve
//! maintainability and ensure consistency across the codebase.
//!
//! # Duration Constants
//!
//! ```rust
//! use loom_term::constants::*;
//! use std::time::Duration;
//!
//! assert_eq!(FRAME_DURATION_60FPS, Duration::from_millis(16));
//! assert_eq!(ESCAPE_DISAMBIGUATION, Duration::from_millis(20));
//! ```

use std::time::Duration;

// =============================================================================
// File / Buffer Size Constants
// =============================================================================

/// One kilobyte in bytes (1024 bytes)
pub const KB: usize = 1024;

/// Maximum accumulated bracketed-paste size (100KB)
///
/// Terminal paste is triggered by bracketed paste mode, which could
/// otherwise allow injection of unbounded content into a single `Paste`
/// event. Once this many bytes have accumulated without the terminator
/// being seen, the decoder stops growing the buffer and surfaces what it
/// has collected so far.
pub const MAX_PASTE_SIZE: usize = 100 * KB;

/// Maximum allowed buffer dimensions to prevent pathological allocation
///
/// 16384x16384 is already 268M cells; no real terminal approaches this.
pub const MAX_BUFFER_DIMENSION: u16 = 16_384;

/// Maximum total buffer size (cells) accepted by [`crate::render::Buffer::try_new`]
pub const MAX_BUFFER_SIZE: usize = 10_000_000;

// =============================================================================
// Frame Rate Constants
// =============================================================================

/// Duration for ~60 FPS frame rate (16.67ms rounded to 16ms)
pub const FRAME_DURATION_60FPS: Duration = Duration::from_millis(16);

/// Duration for ~30 FPS frame rate
pub const FRAME_DURATION_30FPS: Duration = Duration::from_millis(33);

/// Default target frame rate for a new [`crate::app::AppConfig`]
pub const DEFAULT_TARGET_FPS: u32 = 60;

// =============================================================================
// Tick / Poll Constants
// =============================================================================

/// Minimum poll timeout (1ms) used to prevent busy-spinning when a frame is
/// already due.
pub const MIN_POLL_TIMEOUT_MS: u64 = 1;

/// Maximum number of input events drained from the decoder per tick before
/// the render gate is checked again.
pub const MAX_EVENTS_PER_TICK: usize = 5;

/// Escape-vs-CSI disambiguation window: a lone `0x1B` with no following byte
/// within this window is a bare `Escape` key, not the start of a sequence.
pub const ESCAPE_DISAMBIGUATION: Duration = Duration::from_millis(20);

/// Upper bound on bytes read while collecting an SGR mouse sequence, to
/// guard against a malformed stream that never emits the terminating
/// `M`/`m`.
pub const MAX_SGR_MOUSE_SEQUENCE_BYTES: usize = 20;

// =============================================================================
// Test / Debug Constants
// =============================================================================

/// Short sleep used in tests to allow a tick loop iteration to complete.
pub const TEST_SLEEP_SHORT: Duration = Duration::from_millis(10);

/// Medium sleep used in tests that wait on multiple tick iterations.
pub const TEST_SLEEP_MEDIUM: Duration = Duration::from_millis(50);
