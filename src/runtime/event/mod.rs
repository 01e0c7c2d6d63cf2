//! Typed input events, decoded from a raw terminal byte stream.
//!
//! # Quick Start
//!
//! ```rust
//! use loom_term::event::{Event, KeyCode, Modifiers};
//!
//! fn handle(event: &Event) -> bool {
//!     match event {
//!         Event::Key { code: KeyCode::Char('q'), .. } => false,
//!         Event::Quit => false,
//!         _ => true,
//!     }
//! }
//! assert!(handle(&Event::Resize(80, 24)));
//! ```

pub mod decoder;
pub mod reader;

pub use decoder::Decoder;
pub use reader::EventReader;

use bitflags::bitflags;

bitflags! {
    /// Key/mouse modifier bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        /// Control key held.
        const CTRL = 0b001;
        /// Shift key held.
        const SHIFT = 0b010;
        /// Alt (Meta) key held.
        const ALT = 0b100;
    }
}

/// A logical key, independent of the byte sequence that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab (CSI Z).
    BackTab,
    /// Space.
    Space,
    /// Backspace.
    Backspace,
    /// Escape.
    Escape,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Function keys F1..F12.
    F(u8),
}

/// Which mouse button (or wheel direction) an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// Scroll wheel up.
    WheelUp,
    /// Scroll wheel down.
    WheelDown,
}

/// What kind of mouse action occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed down.
    Press,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
    /// Mouse moved while a button is held.
    Drag,
}

/// A decoded mouse event: 0-based column/row, regardless of the wire
/// encoding's 1-based or offset-32 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Which button/wheel.
    pub button: MouseButton,
    /// 0-based column.
    pub x: u16,
    /// 0-based row.
    pub y: u16,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

/// A non-fatal decode failure, carried on [`Event::Unknown`] rather than
/// propagated as an `Error` — see the crate-level error module's doc
/// comment for why `InputError` has no `Error` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// The raw bytes that could not be interpreted.
    pub bytes: Vec<u8>,
}

/// A decoded input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key {
        /// The logical key.
        code: KeyCode,
        /// The literal character, if `code` carries one distinct from its
        /// `Char` payload (kept for symmetry with the decoder's byte-level
        /// view; for `KeyCode::Char(c)` this mirrors `c`).
        char: Option<char>,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A mouse action.
    Mouse(MouseEvent),
    /// Bracketed-paste text, assembled between the paste-start/end markers.
    Paste(String),
    /// The terminal was resized to `(columns, rows)`.
    Resize(u16, u16),
    /// The terminal gained focus.
    FocusIn,
    /// The terminal lost focus.
    FocusOut,
    /// `Ctrl+C` (`0x03`) was received.
    Quit,
    /// A byte sequence could not be decoded; non-fatal, processing
    /// continues with the next byte(s).
    Unknown(DecodeError),
}

impl Event {
    /// Build a plain, unmodified key event.
    pub fn key(code: KeyCode) -> Self {
        let char = match code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        };
        Event::Key {
            code,
            char,
            modifiers: Modifiers::empty(),
        }
    }

    /// Build a key event with modifiers.
    pub fn key_with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        let char = match code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        };
        Event::Key {
            code,
            char,
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_builder_carries_char_for_char_variant() {
        let event = Event::key(KeyCode::Char('a'));
        assert_eq!(
            event,
            Event::Key {
                code: KeyCode::Char('a'),
                char: Some('a'),
                modifiers: Modifiers::empty(),
            }
        );
    }

    #[test]
    fn key_builder_has_no_char_for_named_keys() {
        let event = Event::key(KeyCode::Enter);
        assert_eq!(
            event,
            Event::Key {
                code: KeyCode::Enter,
                char: None,
                modifiers: Modifiers::empty(),
            }
        );
    }

    #[test]
    fn modifiers_combine_independently() {
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(!m.contains(Modifiers::ALT));
    }

    #[test]
    fn unknown_event_carries_raw_bytes() {
        let event = Event::Unknown(DecodeError {
            message: "unrecognized CSI".to_string(),
            bytes: vec![0x1b, b'[', b'~'],
        });
        match event {
            Event::Unknown(e) => assert_eq!(e.bytes, vec![0x1b, b'[', b'~']),
            _ => panic!("expected Unknown"),
        }
    }
}
