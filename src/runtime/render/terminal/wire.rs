//! Raw ANSI/VT100/DEC private-mode byte sequences, bit-exact per the
//! terminal wire protocol table.

use crate::style::Color;
use std::fmt::Write as _;

/// `ESC [ ? 1 0 4 9 h` / `… l`
pub const ALT_SCREEN_ENTER: &str = "\x1b[?1049h";
/// Exit alternate screen.
pub const ALT_SCREEN_EXIT: &str = "\x1b[?1049l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";
/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Save cursor (`ESC 7`).
pub const CURSOR_SAVE: &str = "\x1b7";
/// Restore cursor (`ESC 8`).
pub const CURSOR_RESTORE: &str = "\x1b8";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Clear entire line.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// SGR reset (`ESC [ 0 m`).
pub const SGR_RESET: &str = "\x1b[0m";

/// Mouse reporting on: SGR mode + extended coordinates.
pub const MOUSE_ON: &str = "\x1b[?1000h\x1b[?1006h";
/// Mouse reporting off.
pub const MOUSE_OFF: &str = "\x1b[?1006l\x1b[?1000l";

/// Bracketed paste on.
pub const BRACKETED_PASTE_ON: &str = "\x1b[?2004h";
/// Bracketed paste off.
pub const BRACKETED_PASTE_OFF: &str = "\x1b[?2004l";

/// Focus-in/out reporting on.
pub const FOCUS_EVENTS_ON: &str = "\x1b[?1004h";
/// Focus-in/out reporting off.
pub const FOCUS_EVENTS_OFF: &str = "\x1b[?1004l";

/// Begin synchronized update (DEC 2026).
pub const SYNC_OUTPUT_BEGIN: &str = "\x1b[?2026h";
/// End synchronized update (DEC 2026).
pub const SYNC_OUTPUT_END: &str = "\x1b[?2026l";

/// Absolute cursor position, 1-based `(row, col)`.
pub fn move_to(row: u16, col: u16) -> String {
    format!("\x1b[{};{}H", row, col)
}

/// Relative cursor move. `dir` is one of `A` (up), `B` (down), `C` (right),
/// `D` (left).
pub fn move_relative(n: u16, dir: char) -> String {
    format!("\x1b[{n}{dir}")
}

/// DECSCUSR select cursor style: `ESC [ {n} SP q`.
pub fn cursor_style(n: u8) -> String {
    format!("\x1b[{n} q")
}

/// OSC 8 hyperlink start.
pub fn hyperlink_start(uri: &str) -> String {
    format!("\x1b]8;;{uri}\x1b\\")
}

/// OSC 8 hyperlink end.
pub fn hyperlink_end() -> String {
    "\x1b]8;;\x1b\\".to_string()
}

/// `ESC ] 0 ; {title} BEL` — sets both icon name and window title.
pub fn window_title(title: &str) -> String {
    format!("\x1b]0;{title}\x07")
}

/// `ESC ] 1 ; {title} BEL` — sets the icon name only.
pub fn icon_name(title: &str) -> String {
    format!("\x1b]1;{title}\x07")
}

/// `ESC ] 2 ; {title} BEL` — sets the window title only.
pub fn window_title_only(title: &str) -> String {
    format!("\x1b]2;{title}\x07")
}

/// Append the SGR sequence selecting `color` as foreground (`ground = 3`)
/// or background (`ground = 4`) onto `out`, without a leading/trailing `m`
/// boundary of its own — callers combine multiple parameters into one `m`
/// terminator via [`sgr_params`].
fn color_params(color: Color, ground: u8, bright_base: u8, out: &mut Vec<String>) {
    match color {
        Color::Default => out.push(format!("{}", ground as u16 * 10 + 9)),
        Color::Indexed(n) => {
            if n < 8 {
                out.push(format!("{}", ground as u16 * 10 + n as u16));
            } else {
                out.push(format!("{}", bright_base as u16 + (n as u16 - 8)));
            }
        }
        Color::Palette(n) => out.push(format!("{}8;5;{n}", ground)),
        Color::Rgb(r, g, b) => out.push(format!("{}8;2;{r};{g};{b}", ground)),
    }
}

/// Build a single combined SGR sequence (`ESC [ {p1} ; {p2} ; ... m`) for a
/// style's foreground, background, and modifier bits. Returns `None` if the
/// style is the default (nothing to emit).
pub fn sgr_params(
    fg: Option<Color>,
    bg: Option<Color>,
    modifier: crate::style::Modifier,
) -> Option<String> {
    use crate::style::Modifier;

    let mut params = Vec::new();
    if let Some(fg) = fg {
        color_params(fg, 3, 90, &mut params);
    }
    if let Some(bg) = bg {
        color_params(bg, 4, 100, &mut params);
    }
    let bits: &[(Modifier, u8)] = &[
        (Modifier::BOLD, 1),
        (Modifier::DIM, 2),
        (Modifier::ITALIC, 3),
        (Modifier::UNDERLINE, 4),
        (Modifier::SLOW_BLINK, 5),
        (Modifier::RAPID_BLINK, 6),
        (Modifier::REVERSE, 7),
        (Modifier::HIDDEN, 8),
        (Modifier::STRIKETHROUGH, 9),
    ];
    for (flag, code) in bits {
        if modifier.contains(*flag) {
            params.push(code.to_string());
        }
    }
    if params.is_empty() {
        return None;
    }
    let mut sequence = String::from("\x1b[");
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            sequence.push(';');
        }
        let _ = write!(sequence, "{p}");
    }
    sequence.push('m');
    Some(sequence)
}
