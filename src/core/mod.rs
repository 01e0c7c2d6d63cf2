//! Core runtime constants
//!
//! This module centralizes magic numbers and commonly used values shared by
//! the renderer, the input decoder, and the tick loop.

pub mod constants;
