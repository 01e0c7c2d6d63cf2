//! A single terminal character position.

use crate::style::{Color, Modifier, Style};

/// One terminal cell: a grapheme cluster, a style, an optional hyperlink,
/// and a display width.
///
/// The symbol is stored inline (grapheme clusters are specified to be at
/// most 8 UTF-8 bytes) so `Cell` stays `Copy` — buffers hold tens of
/// thousands of these and get swapped/diffed every frame.
///
/// Invariants upheld by the buffer layer, not by `Cell` itself: a width-2
/// cell is followed in the same row by a width-0 continuation cell; no cell
/// straddles a row boundary; an empty cell has symbol `" "`, default style,
/// width 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    symbol_bytes: [u8; 8],
    symbol_len: u8,
    /// Foreground color override.
    pub fg: Option<Color>,
    /// Background color override.
    pub bg: Option<Color>,
    /// Active modifier bits.
    pub modifier: Modifier,
    /// OSC 8 hyperlink id, indexing into the owning buffer's hyperlink
    /// table. `None` means no hyperlink.
    pub hyperlink_id: Option<u16>,
    /// Display width: 0 (continuation), 1, or 2.
    pub width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl Cell {
    /// An empty cell: a single space, default style, width 1.
    pub fn empty() -> Self {
        Cell::new(" ")
    }

    /// A width-0 continuation cell, placed after a wide glyph.
    pub fn continuation() -> Self {
        let mut cell = Cell::new(" ");
        cell.width = 0;
        cell
    }

    /// Build a cell from a grapheme cluster, computing its display width.
    ///
    /// Graphemes longer than 8 bytes are truncated to a single space: the
    /// specification bounds grapheme clusters to 1..8 bytes, so this only
    /// triggers on malformed input from a caller that skipped validation.
    pub fn new(grapheme: &str) -> Self {
        let width = crate::text::display_width(grapheme) as u8;
        let mut symbol_bytes = [0u8; 8];
        let bytes = grapheme.as_bytes();
        let symbol_len = if bytes.len() <= 8 {
            symbol_bytes[..bytes.len()].copy_from_slice(bytes);
            bytes.len() as u8
        } else {
            symbol_bytes[0] = b' ';
            1
        };
        Cell {
            symbol_bytes,
            symbol_len,
            fg: None,
            bg: None,
            modifier: Modifier::empty(),
            hyperlink_id: None,
            width: width.max(1),
        }
    }

    /// The grapheme cluster this cell holds.
    pub fn symbol(&self) -> &str {
        std::str::from_utf8(&self.symbol_bytes[..self.symbol_len as usize]).unwrap_or(" ")
    }

    /// Derive the `Style` value for this cell.
    pub fn style(&self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            modifier: self.modifier,
        }
    }

    /// Apply a `Style` to this cell.
    pub fn with_style(mut self, style: Style) -> Self {
        self.fg = style.fg;
        self.bg = style.bg;
        self.modifier = style.modifier;
        self
    }

    /// Set foreground color.
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set background color.
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add modifier bits.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier |= modifier;
        self
    }

    /// Attach an OSC 8 hyperlink id.
    pub fn hyperlink(mut self, id: u16) -> Self {
        self.hyperlink_id = Some(id);
        self
    }

    /// True if this is a width-0 continuation of a preceding wide glyph.
    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Reset this cell to the empty state in place.
    pub fn reset(&mut self) {
        *self = Cell::empty();
    }

    /// True if this cell is transparent for `Buffer::merge` purposes: a
    /// plain space in the default style, with no hyperlink.
    pub fn is_transparent(&self) -> bool {
        self.symbol() == " " && self.style().is_default() && self.hyperlink_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_width() {
        assert_eq!(Cell::new("A").width, 1);
        assert_eq!(Cell::new("\u{4E2D}").width, 2); // 中, wide CJK ideograph
    }

    #[test]
    fn empty_cell_is_default_space() {
        let cell = Cell::empty();
        assert_eq!(cell.symbol(), " ");
        assert!(cell.style().is_default());
        assert_eq!(cell.width, 1);
    }

    #[test]
    fn continuation_is_width_zero() {
        let cell = Cell::continuation();
        assert!(cell.is_continuation());
    }

    #[test]
    fn builder_methods_compose() {
        let cell = Cell::new("x").fg(Color::Indexed(1)).modifier(Modifier::BOLD);
        assert_eq!(cell.fg, Some(Color::Indexed(1)));
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn multi_byte_grapheme_round_trips() {
        let cell = Cell::new("e\u{0301}"); // e + combining acute accent
        assert_eq!(cell.symbol(), "e\u{0301}");
    }

    #[test]
    fn is_copy_not_move() {
        let a = Cell::new("A");
        let b = a;
        assert_eq!(a.symbol(), b.symbol());
    }

    #[test]
    fn transparent_cell_detection() {
        assert!(Cell::empty().is_transparent());
        assert!(!Cell::new("A").is_transparent());
        assert!(!Cell::empty().fg(Color::Indexed(1)).is_transparent());
    }
}
