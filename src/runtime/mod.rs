//! Runtime systems for the terminal core
//!
//! - **geometry**: `Position`, `Size`, `Rect`
//! - **style**: color, modifier bits, and the combined `Style` value
//! - **render**: cell buffer, differential renderer, cursor, terminal driver
//! - **event**: input decoder, event types, non-blocking reader
//! - **tick**: FPS governor and the event/render tick loop
//! - **window**: z-ordered window manager

pub mod event;
pub mod geometry;
pub mod render;
pub mod style;
pub mod tick;
pub mod window;
