//! Color, style modifiers, and the combined [`Style`] value.
//!
//! # Quick Start
//!
//! ```rust
//! use loom_term::style::{Color, Modifier, Style};
//!
//! let style = Style::default()
//!     .fg(Color::Rgb(255, 128, 0))
//!     .bg(Color::Indexed(4))
//!     .modifier(Modifier::BOLD | Modifier::UNDERLINE);
//! assert!(style.modifier.contains(Modifier::BOLD));
//! ```

use bitflags::bitflags;

/// A terminal color.
///
/// `Default` defers to the terminal's own foreground/background. `Indexed`
/// is the standard 16-color ANSI palette (0..15). `Palette` is the xterm
/// 256-color cube plus grayscale ramp (0..255). `Rgb` is a direct truecolor
/// value; conversions from `Rgb` to the narrower variants are lossy, the
/// reverse is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default foreground/background.
    #[default]
    Default,
    /// Standard ANSI 16-color palette, 0..15.
    Indexed(u8),
    /// xterm 256-color palette, 0..255.
    Palette(u8),
    /// Direct truecolor value.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Map a grayscale step (0..23) to the xterm grayscale ramp (232..255).
    pub fn grayscale(n: u8) -> Color {
        Color::Palette(232 + n.min(23))
    }
}

bitflags! {
    /// Style modifier bits, matching the SGR attribute set in §6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifier: u16 {
        /// SGR 1
        const BOLD = 0b0000_0000_0001;
        /// SGR 2
        const DIM = 0b0000_0000_0010;
        /// SGR 3
        const ITALIC = 0b0000_0000_0100;
        /// SGR 4
        const UNDERLINE = 0b0000_0000_1000;
        /// SGR 5
        const SLOW_BLINK = 0b0000_0001_0000;
        /// SGR 6
        const RAPID_BLINK = 0b0000_0010_0000;
        /// SGR 7
        const REVERSE = 0b0000_0100_0000;
        /// SGR 8
        const HIDDEN = 0b0000_1000_0000;
        /// SGR 9
        const STRIKETHROUGH = 0b0001_0000_0000;
    }
}

/// Foreground, background, and modifier bits for a single cell.
///
/// Styles compare by value; [`Style::default`] is the identity element (no
/// fg/bg override, no modifiers) used as the baseline for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color override, or `None` to inherit the terminal default.
    pub fg: Option<Color>,
    /// Background color override, or `None` to inherit the terminal default.
    pub bg: Option<Color>,
    /// Active modifier bits.
    pub modifier: Modifier,
}

impl Style {
    /// Set the foreground color.
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Replace the modifier bits.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Add modifier bits, keeping any already set.
    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier |= modifier;
        self
    }

    /// True iff this is the identity style (no overrides, no modifiers).
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }
}
