//! Grapheme iteration and East-Asian display-width calculation.
//!
//! Per the specification's open question on wide-character handling, width
//! is computed from the Unicode East-Asian-Width table rather than a
//! simplified code-point count — here via the `unicode-width` crate, with
//! grapheme-cluster segmentation from `unicode-segmentation` so multi-code-point
//! clusters (e.g. a base letter plus combining marks, or an emoji ZWJ
//! sequence) are measured and iterated as a single unit.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single grapheme cluster: 0, 1, or 2.
///
/// Zero-width combining marks and control characters measure 0; most CJK,
/// Hangul, and fullwidth characters measure 2; everything else measures 1.
pub fn grapheme_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme).min(2)
}

/// Total display width of a string, summing each grapheme cluster's width.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Iterate the grapheme clusters of `s` in order.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Truncate `s` to fit within `max_width` display columns, without splitting
/// a grapheme cluster.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut end = 0;
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if width + w > max_width {
            break;
        }
        width += w;
        end += g.len();
    }
    &s[..end]
}

/// Truncate `s` to `max_width` columns, appending an ellipsis (`…`, width 1)
/// if truncation occurred. Used by the window manager for border titles
/// (spec Scenario H).
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width || max_width == 0 {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let truncated = truncate_to_width(s, budget);
    format!("{truncated}\u{2026}")
}
