//! Byte stream → [`Event`] state machine: CSI/SS3/UTF-8 parsing, mouse
//! decoding, bracketed paste, and the 20ms escape-vs-CSI disambiguation.

use super::{DecodeError, Event, KeyCode, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use crate::core::constants::MAX_PASTE_SIZE;
use std::collections::VecDeque;

/// The six-byte bracketed-paste terminator.
const PASTE_END: &[u8] = b"\x1b[201~";

/// Decoder internal state, per the design note's `step(byte) -> Option<Event>`
/// shape: every byte flows through `step`, which returns a completed event
/// (or `None` while still accumulating a multi-byte sequence).
enum ParseState {
    /// Waiting for the start of a new sequence.
    Ground,
    /// Saw `ESC`; waiting to see whether a CSI/SS3 introducer follows before
    /// the 20ms disambiguation window lapses.
    Escape,
    /// Saw `ESC [`; accumulating CSI parameter/intermediate bytes.
    Csi(Vec<u8>),
    /// Saw `ESC O`; the next byte selects an SS3 function key.
    Ss3,
    /// Saw `ESC [ M`; accumulating the 3 raw X10 mouse bytes.
    X10Mouse(Vec<u8>),
    /// Saw `ESC [ <`; accumulating decimal SGR mouse parameters.
    SgrMouse(Vec<u8>),
    /// Accumulating a multi-byte UTF-8 grapheme.
    Utf8 { buf: Vec<u8>, expected: usize },
    /// Between `ESC[200~` and `ESC[201~`, collecting pasted text.
    Paste {
        text: Vec<u8>,
        /// How many trailing bytes of `text` match a prefix of `PASTE_END`.
        terminator_match: usize,
    },
}

/// A stateful byte-stream decoder.
///
/// [`Decoder::step`] consumes one byte and returns the next completed event,
/// if any is ready — including one left over from a prior byte that
/// produced two events (e.g. an ambiguous `ESC` resolved alongside the byte
/// that disambiguated it). Internally, a single byte can complete more than
/// one event; these queue in FIFO order and drain one-per-`step`-call so no
/// event is ever silently dropped. [`Decoder::feed`] and [`Decoder::flush`]
/// account for this queue so callers don't need to track it themselves.
pub struct Decoder {
    state: ParseState,
    pending: VecDeque<Event>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// A decoder at rest, not mid-sequence.
    pub fn new() -> Self {
        Self {
            state: ParseState::Ground,
            pending: VecDeque::new(),
        }
    }

    /// True if the decoder is waiting for more bytes of the sequence it
    /// began with a previous `step`/`feed` call — i.e. an `ESC` alone is
    /// ambiguous until either more bytes arrive or the caller calls
    /// [`Decoder::timeout_escape`].
    pub fn is_pending(&self) -> bool {
        !matches!(self.state, ParseState::Ground)
    }

    /// True iff the decoder is specifically waiting on a bare `ESC` that
    /// could still turn into the start of a CSI/SS3 sequence — the only
    /// state [`Decoder::timeout_escape`] resolves. Distinct from
    /// [`Decoder::is_pending`], which is also true mid-CSI, mid-UTF-8, and
    /// mid-paste, none of which the 20ms disambiguation window applies to.
    pub fn is_escape_pending(&self) -> bool {
        matches!(self.state, ParseState::Escape)
    }

    /// Call when the 20ms disambiguation window lapses with no further
    /// bytes: a lone pending `ESC` resolves to `Event::Key(Escape)`.
    /// No-op (returns `None`) if the decoder isn't waiting on a bare escape.
    pub fn timeout_escape(&mut self) -> Option<Event> {
        match self.state {
            ParseState::Escape => {
                self.state = ParseState::Ground;
                Some(Event::key(KeyCode::Escape))
            }
            _ => None,
        }
    }

    /// Feed a batch of bytes, returning every event they complete, in order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        for &b in bytes {
            if let Some(e) = self.step(b) {
                events.push(e);
            }
        }
        events.extend(self.flush());
        events
    }

    /// Drain any events queued but not yet returned by `step`. Call after
    /// the input stream is exhausted (or between reads) to avoid leaving an
    /// event stuck in the queue.
    pub fn flush(&mut self) -> Vec<Event> {
        self.pending.drain(..).collect()
    }

    /// Feed a single byte, returning the next completed event, if any —
    /// which may be one queued from an earlier byte rather than one `byte`
    /// itself produced.
    pub fn step(&mut self, byte: u8) -> Option<Event> {
        self.dispatch(byte);
        self.pending.pop_front()
    }

    fn emit(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    fn dispatch(&mut self, byte: u8) {
        match std::mem::replace(&mut self.state, ParseState::Ground) {
            ParseState::Ground => self.step_ground(byte),
            ParseState::Escape => self.step_escape(byte),
            ParseState::Ss3 => self.step_ss3(byte),
            ParseState::Csi(buf) => self.step_csi(buf, byte),
            ParseState::X10Mouse(buf) => self.step_x10_mouse(buf, byte),
            ParseState::SgrMouse(buf) => self.step_sgr_mouse(buf, byte),
            ParseState::Utf8 { buf, expected } => self.step_utf8(buf, expected, byte),
            ParseState::Paste {
                text,
                terminator_match,
            } => self.step_paste(text, terminator_match, byte),
        }
    }

    fn step_ground(&mut self, byte: u8) {
        match byte {
            0x03 => self.emit(Event::Quit),
            0x09 => self.emit(Event::key(KeyCode::Tab)),
            0x0A | 0x0D => self.emit(Event::key(KeyCode::Enter)),
            0x20 => self.emit(Event::key(KeyCode::Space)),
            0x08 | 0x7F => self.emit(Event::key(KeyCode::Backspace)),
            0x1B => self.state = ParseState::Escape,
            0x01..=0x1A => {
                // Ctrl+letter: 0x01 = Ctrl+A .. 0x1A = Ctrl+Z.
                let c = (byte - 0x01 + b'a') as char;
                self.emit(Event::key_with_modifiers(KeyCode::Char(c), Modifiers::CTRL));
            }
            0x00 | 0x1C..=0x1F => {
                let c = (byte ^ 0x40) as char; // maps to the shifted digit/symbol
                self.emit(Event::key_with_modifiers(KeyCode::Char(c), Modifiers::CTRL));
            }
            0x20..=0x7E => self.emit(Event::key(KeyCode::Char(byte as char))),
            _ => self.start_utf8(byte),
        }
    }

    fn start_utf8(&mut self, byte: u8) {
        let expected = if byte & 0b1110_0000 == 0b1100_0000 {
            2
        } else if byte & 0b1111_0000 == 0b1110_0000 {
            3
        } else if byte & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            self.emit(Event::Unknown(DecodeError {
                message: "invalid UTF-8 lead byte".to_string(),
                bytes: vec![byte],
            }));
            return;
        };
        self.state = ParseState::Utf8 {
            buf: vec![byte],
            expected,
        };
    }

    fn step_utf8(&mut self, mut buf: Vec<u8>, expected: usize, byte: u8) {
        if byte & 0b1100_0000 != 0b1000_0000 {
            self.emit(Event::Unknown(DecodeError {
                message: "truncated UTF-8 sequence".to_string(),
                bytes: buf,
            }));
            // The byte that broke the sequence might itself start a new one.
            self.step_ground(byte);
            return;
        }
        buf.push(byte);
        if buf.len() < expected {
            self.state = ParseState::Utf8 { buf, expected };
            return;
        }
        match std::str::from_utf8(&buf).ok().and_then(|s| s.chars().next()) {
            Some(c) => self.emit(Event::key(KeyCode::Char(c))),
            None => self.emit(Event::Unknown(DecodeError {
                message: "invalid UTF-8 sequence".to_string(),
                bytes: buf,
            })),
        }
    }

    fn step_escape(&mut self, byte: u8) {
        match byte {
            b'[' => self.state = ParseState::Csi(Vec::new()),
            b'O' => self.state = ParseState::Ss3,
            _ => {
                // Not a recognized introducer: the pending ESC stands alone
                // as an Escape key, and `byte` is reprocessed from Ground —
                // both events are queued so neither is lost.
                self.emit(Event::key(KeyCode::Escape));
                self.step_ground(byte);
            }
        }
    }

    fn step_ss3(&mut self, byte: u8) {
        let event = match byte {
            b'P' => Event::key(KeyCode::F(1)),
            b'Q' => Event::key(KeyCode::F(2)),
            b'R' => Event::key(KeyCode::F(3)),
            b'S' => Event::key(KeyCode::F(4)),
            _ => Event::Unknown(DecodeError {
                message: "unrecognized SS3 sequence".to_string(),
                bytes: vec![0x1b, b'O', byte],
            }),
        };
        self.emit(event);
    }

    fn step_csi(&mut self, mut buf: Vec<u8>, byte: u8) {
        match byte {
            b'A' => self.emit(letter_csi_event(&buf, KeyCode::Up)),
            b'B' => self.emit(letter_csi_event(&buf, KeyCode::Down)),
            b'C' => self.emit(letter_csi_event(&buf, KeyCode::Right)),
            b'D' => self.emit(letter_csi_event(&buf, KeyCode::Left)),
            b'H' => self.emit(letter_csi_event(&buf, KeyCode::Home)),
            b'F' => self.emit(letter_csi_event(&buf, KeyCode::End)),
            b'Z' => self.emit(letter_csi_event(&buf, KeyCode::BackTab)),
            b'I' if buf.is_empty() => self.emit(Event::FocusIn),
            b'O' if buf.is_empty() => self.emit(Event::FocusOut),
            b'M' if buf.is_empty() => self.state = ParseState::X10Mouse(Vec::new()),
            b'<' if buf.is_empty() => self.state = ParseState::SgrMouse(Vec::new()),
            b'0'..=b'9' | b';' => {
                buf.push(byte);
                self.state = ParseState::Csi(buf);
            }
            b'~' => self.finish_numeric_csi(&buf),
            _ => {
                let mut bytes = vec![0x1b, b'['];
                bytes.extend_from_slice(&buf);
                bytes.push(byte);
                self.emit(Event::Unknown(DecodeError {
                    message: "unrecognized CSI final byte".to_string(),
                    bytes,
                }));
            }
        }
    }

    fn finish_numeric_csi(&mut self, buf: &[u8]) {
        let text = String::from_utf8_lossy(buf);
        let parts: Vec<&str> = text.split(';').collect();
        let nums: Vec<i64> = parts.iter().map(|p| p.parse().unwrap_or(-1)).collect();

        let event = match nums.as_slice() {
            [200] => {
                self.state = ParseState::Paste {
                    text: Vec::new(),
                    terminator_match: 0,
                };
                return;
            }
            [201] => return, // stray paste-end outside paste mode: ignore
            [1] => Event::key(KeyCode::Home),
            [2] => Event::key(KeyCode::Insert),
            [3] => Event::key(KeyCode::Delete),
            [4] => Event::key(KeyCode::End),
            [5] => Event::key(KeyCode::PageUp),
            [6] => Event::key(KeyCode::PageDown),
            [d] if (11..=24).contains(d) => Event::key(KeyCode::F((d - 10) as u8)),
            [d, m] => match numeric_to_code(*d) {
                Some(code) => Event::key_with_modifiers(code, modifiers_from_param(*m)),
                None => Event::Unknown(DecodeError {
                    message: "unrecognized modified-key code".to_string(),
                    bytes: buf.to_vec(),
                }),
            },
            _ => Event::Unknown(DecodeError {
                message: "unrecognized numeric CSI".to_string(),
                bytes: buf.to_vec(),
            }),
        };
        self.emit(event);
    }

    fn step_x10_mouse(&mut self, mut buf: Vec<u8>, byte: u8) {
        buf.push(byte);
        if buf.len() < 3 {
            self.state = ParseState::X10Mouse(buf);
            return;
        }
        let (cb, cx, cy) = (buf[0].saturating_sub(32), buf[1], buf[2]);
        let x = cx.saturating_sub(33) as u16; // offset-32, then to 0-based
        let y = cy.saturating_sub(33) as u16;
        self.emit(mouse_event_from_bits(cb, x, y, false));
    }

    fn step_sgr_mouse(&mut self, mut buf: Vec<u8>, byte: u8) {
        if byte == b'M' || byte == b'm' {
            let text = String::from_utf8_lossy(&buf);
            let nums: Vec<&str> = text.split(';').collect();
            if nums.len() != 3 {
                self.emit(Event::Unknown(DecodeError {
                    message: "malformed SGR mouse sequence".to_string(),
                    bytes: buf,
                }));
                return;
            }
            let cb: u8 = nums[0].parse().unwrap_or(0);
            let x: u16 = nums[1].parse::<u16>().unwrap_or(1).saturating_sub(1);
            let y: u16 = nums[2].parse::<u16>().unwrap_or(1).saturating_sub(1);
            let mut event = mouse_event_from_bits(cb, x, y, true);
            if byte == b'm' {
                if let Event::Mouse(m) = &mut event {
                    m.kind = MouseEventKind::Release;
                }
            }
            self.emit(event);
            return;
        }
        buf.push(byte);
        if buf.len() > crate::core::constants::MAX_SGR_MOUSE_SEQUENCE_BYTES {
            self.emit(Event::Unknown(DecodeError {
                message: "SGR mouse sequence too long".to_string(),
                bytes: buf,
            }));
            return;
        }
        self.state = ParseState::SgrMouse(buf);
    }

    fn step_paste(&mut self, mut text: Vec<u8>, terminator_match: usize, byte: u8) {
        if byte == PASTE_END[terminator_match] {
            let matched = terminator_match + 1;
            if matched == PASTE_END.len() {
                self.emit(Event::Paste(String::from_utf8_lossy(&text).to_string()));
                return;
            }
            self.state = ParseState::Paste {
                text,
                terminator_match: matched,
            };
            return;
        }
        // The byte broke a partial terminator match: re-emit the
        // previously-matched prefix as literal pasted text before
        // continuing, so "ESC[20" inside real paste content isn't lost.
        text.extend_from_slice(&PASTE_END[..terminator_match]);
        text.push(byte);
        if text.len() > MAX_PASTE_SIZE {
            self.emit(Event::Unknown(DecodeError {
                message: "paste exceeded maximum size".to_string(),
                bytes: Vec::new(),
            }));
            return;
        }
        self.state = ParseState::Paste {
            text,
            terminator_match: 0,
        };
    }
}

/// A letter-terminated CSI final byte with accumulated parameter bytes
/// (`ESC[1;5A`): `buf` holds everything between `[` and the final letter. An
/// empty `buf` is the unmodified key; otherwise the last `;`-separated
/// parameter is the modifier code (§4.4.2's `d ; m X`), the leading `d` (when
/// present) always being the redundant key-id `1`.
fn letter_csi_event(buf: &[u8], code: KeyCode) -> Event {
    if buf.is_empty() {
        return Event::key(code);
    }
    let text = String::from_utf8_lossy(buf);
    let modifier_param = text
        .split(';')
        .next_back()
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(-1);
    Event::key_with_modifiers(code, modifiers_from_param(modifier_param))
}

fn numeric_to_code(d: i64) -> Option<KeyCode> {
    match d {
        1 => Some(KeyCode::Home),
        2 => Some(KeyCode::Insert),
        3 => Some(KeyCode::Delete),
        4 => Some(KeyCode::End),
        5 => Some(KeyCode::PageUp),
        6 => Some(KeyCode::PageDown),
        _ => None,
    }
}

fn modifiers_from_param(m: i64) -> Modifiers {
    match m {
        2 => Modifiers::SHIFT,
        3 => Modifiers::ALT,
        4 => Modifiers::SHIFT | Modifiers::ALT,
        5 => Modifiers::CTRL,
        6 => Modifiers::CTRL | Modifiers::SHIFT,
        7 => Modifiers::CTRL | Modifiers::ALT,
        8 => Modifiers::CTRL | Modifiers::SHIFT | Modifiers::ALT,
        _ => Modifiers::empty(),
    }
}

/// `is_sgr` selects 0-based-already (SGR) vs needs-no-release-inference
/// (X10, where a clear button field of `3` means release).
fn mouse_event_from_bits(cb: u8, x: u16, y: u16, is_sgr: bool) -> Event {
    let button_bits = cb & 0b11;
    let is_wheel = cb & 0b0100_0000 != 0;
    let is_drag = cb & 0b0010_0000 != 0;

    let (button, kind) = if is_wheel {
        let wheel_button = if cb & 0b1 == 0 {
            MouseButton::WheelUp
        } else {
            MouseButton::WheelDown
        };
        (wheel_button, MouseEventKind::Press)
    } else {
        let button = match button_bits {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        };
        if is_drag {
            (button, MouseEventKind::Drag)
        } else if !is_sgr && button_bits == 3 {
            // X10 has no button identity on release; bits == 3 means "no
            // button" (release or plain move).
            (button, MouseEventKind::Move)
        } else {
            (button, MouseEventKind::Press)
        }
    };

    let mut modifiers = Modifiers::empty();
    if cb & 0b0000_0100 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 0b0000_1000 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 0b0001_0000 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    Event::Mouse(MouseEvent {
        kind,
        button,
        x,
        y,
        modifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_is_quit() {
        let mut d = Decoder::new();
        assert_eq!(d.step(0x03), Some(Event::Quit));
    }

    #[test]
    fn plain_ascii_char() {
        let mut d = Decoder::new();
        assert_eq!(d.step(b'a'), Some(Event::key(KeyCode::Char('a'))));
    }

    #[test]
    fn ctrl_letter_sets_modifier() {
        let mut d = Decoder::new();
        assert_eq!(
            d.step(0x01),
            Some(Event::key_with_modifiers(KeyCode::Char('a'), Modifiers::CTRL))
        );
    }

    #[test]
    fn arrow_key_via_csi() {
        let mut d = Decoder::new();
        assert_eq!(d.step(0x1B), None);
        assert_eq!(d.step(b'['), None);
        assert_eq!(d.step(b'A'), Some(Event::key(KeyCode::Up)));
    }

    #[test]
    fn ctrl_modified_arrow_key_via_csi() {
        // ESC[1;5A — scenario C: a letter-terminated CSI still carries its
        // accumulated `d;m` parameter bytes, here modifier 5 = Ctrl.
        let mut d = Decoder::new();
        for b in [0x1B, b'[', b'1', b';', b'5'] {
            assert_eq!(d.step(b), None);
        }
        assert_eq!(
            d.step(b'A'),
            Some(Event::key_with_modifiers(KeyCode::Up, Modifiers::CTRL))
        );
    }

    #[test]
    fn shift_alt_modified_end_key_via_csi() {
        let mut d = Decoder::new();
        for b in [0x1B, b'[', b'1', b';', b'4'] {
            assert_eq!(d.step(b), None);
        }
        assert_eq!(
            d.step(b'F'),
            Some(Event::key_with_modifiers(
                KeyCode::End,
                Modifiers::SHIFT | Modifiers::ALT
            ))
        );
    }

    #[test]
    fn pending_escape_times_out_to_escape_key() {
        let mut d = Decoder::new();
        assert_eq!(d.step(0x1B), None);
        assert!(d.is_pending());
        assert_eq!(d.timeout_escape(), Some(Event::key(KeyCode::Escape)));
        assert!(!d.is_pending());
    }

    #[test]
    fn is_escape_pending_is_false_once_a_csi_introducer_arrives() {
        // A bare ESC is escape-pending; once `[` arrives the decoder is
        // mid-CSI, which `is_pending` still reports but the 20ms bare-escape
        // window no longer applies to.
        let mut d = Decoder::new();
        d.step(0x1B);
        assert!(d.is_escape_pending());
        d.step(b'[');
        assert!(d.is_pending());
        assert!(!d.is_escape_pending());
    }

    #[test]
    fn escape_followed_by_unrelated_byte_loses_no_events() {
        // ESC immediately followed by a plain char with no CSI/SS3
        // introducer: both the bare Escape and the char must surface.
        let mut d = Decoder::new();
        let events = d.feed(&[0x1B, b'x']);
        assert_eq!(
            events,
            vec![Event::key(KeyCode::Escape), Event::key(KeyCode::Char('x'))]
        );
    }

    #[test]
    fn ss3_function_keys() {
        let mut d = Decoder::new();
        d.step(0x1B);
        d.step(b'O');
        assert_eq!(d.step(b'P'), Some(Event::key(KeyCode::F(1))));
    }

    #[test]
    fn numeric_csi_delete() {
        let mut d = Decoder::new();
        d.step(0x1B);
        d.step(b'[');
        d.step(b'3');
        assert_eq!(d.step(b'~'), Some(Event::key(KeyCode::Delete)));
    }

    #[test]
    fn numeric_csi_function_key_f5() {
        let mut d = Decoder::new();
        for b in [0x1B, b'[', b'1', b'5'] {
            d.step(b);
        }
        assert_eq!(d.step(b'~'), Some(Event::key(KeyCode::F(5))));
    }

    #[test]
    fn modified_key_shift_home() {
        let mut d = Decoder::new();
        for b in [0x1B, b'[', b'1', b';', b'2'] {
            d.step(b);
        }
        let event = d.step(b'~').unwrap();
        assert_eq!(
            event,
            Event::key_with_modifiers(KeyCode::Home, Modifiers::SHIFT)
        );
    }

    #[test]
    fn x10_mouse_left_click() {
        let mut d = Decoder::new();
        for b in [0x1B, b'[', b'M'] {
            d.step(b);
        }
        d.step(32); // button byte: left click, no modifiers
        d.step(33 + 5); // x = 5
        let event = d.step(33 + 10).unwrap(); // y = 10
        match event {
            Event::Mouse(m) => {
                assert_eq!(m.button, MouseButton::Left);
                assert_eq!(m.x, 5);
                assert_eq!(m.y, 10);
            }
            _ => panic!("expected mouse event"),
        }
    }

    #[test]
    fn sgr_mouse_press_and_release() {
        let mut d = Decoder::new();
        let events = d.feed(b"\x1b[<0;10;20M");
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::Mouse(m) => {
                assert_eq!(m.kind, MouseEventKind::Press);
                assert_eq!(m.x, 9);
                assert_eq!(m.y, 19);
            }
            _ => panic!("expected mouse event"),
        }

        let mut d2 = Decoder::new();
        let events2 = d2.feed(b"\x1b[<0;10;20m");
        match &events2[0] {
            Event::Mouse(m) => assert_eq!(m.kind, MouseEventKind::Release),
            _ => panic!("expected mouse event"),
        }
    }

    #[test]
    fn sgr_mouse_wheel_up() {
        let mut d = Decoder::new();
        let events = d.feed(b"\x1b[<64;1;1M");
        match &events[0] {
            Event::Mouse(m) => assert_eq!(m.button, MouseButton::WheelUp),
            _ => panic!("expected mouse event"),
        }
    }

    #[test]
    fn bracketed_paste_round_trip() {
        let mut d = Decoder::new();
        let events = d.feed(b"\x1b[200~hello\x1b[201~");
        assert_eq!(events, vec![Event::Paste("hello".to_string())]);
    }

    #[test]
    fn paste_with_partial_terminator_prefix_inside_text() {
        // The text itself contains a prefix of the terminator ("\x1b[20")
        // before continuing with unrelated bytes; it must not truncate.
        let mut d = Decoder::new();
        let mut input = b"\x1b[200~".to_vec();
        input.extend_from_slice(b"a\x1b[20x");
        input.extend_from_slice(b"\x1b[201~");
        let events = d.feed(&input);
        assert_eq!(events, vec![Event::Paste("a\x1b[20x".to_string())]);
    }

    #[test]
    fn multi_byte_utf8_grapheme() {
        let mut d = Decoder::new();
        let events = d.feed("\u{4E2D}".as_bytes()); // 中, 3 bytes
        assert_eq!(events, vec![Event::key(KeyCode::Char('\u{4E2D}'))]);
    }

    #[test]
    fn truncated_utf8_sequence_emits_unknown() {
        let mut d = Decoder::new();
        d.step(0xE4); // 3-byte lead
        let event = d.step(b'a'); // not a continuation byte
        match event {
            Some(Event::Unknown(_)) => {}
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn focus_in_and_out() {
        let mut d = Decoder::new();
        let events = d.feed(b"\x1b[I");
        assert_eq!(events, vec![Event::FocusIn]);

        let mut d2 = Decoder::new();
        let events2 = d2.feed(b"\x1b[O");
        assert_eq!(events2, vec![Event::FocusOut]);
    }
}
