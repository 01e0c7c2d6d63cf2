//! The cell grid: a rectangular area of cells plus dirty-region tracking.

use super::Cell;
use crate::core::constants::{MAX_BUFFER_DIMENSION, MAX_BUFFER_SIZE};
use crate::geometry::Rect;
use crate::style::Style;
use std::collections::HashMap;

/// Error returned by [`Buffer::try_new`] when requested dimensions would
/// allocate a pathological amount of memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Width exceeds `MAX_BUFFER_DIMENSION`.
    #[error("buffer width {width} exceeds maximum allowed dimension {max}")]
    InvalidWidth {
        /// The requested width.
        width: u16,
        /// Maximum allowed width.
        max: u16,
    },
    /// Height exceeds `MAX_BUFFER_DIMENSION`.
    #[error("buffer height {height} exceeds maximum allowed dimension {max}")]
    InvalidHeight {
        /// The requested height.
        height: u16,
        /// Maximum allowed height.
        max: u16,
    },
    /// Total cell count exceeds `MAX_BUFFER_SIZE`.
    #[error("buffer size {size} cells exceeds maximum allowed {max} cells")]
    InvalidSize {
        /// The requested buffer size in cells.
        size: usize,
        /// Maximum allowed buffer size in cells.
        max: usize,
    },
}

/// A rectangular grid of cells with dirty-region tracking.
///
/// `cells.len() == area.width * area.height` always holds; writes outside
/// `area` are silently clipped rather than erroring (§4.1's "these
/// operations do not fail" contract).
#[derive(Debug, Clone)]
pub struct Buffer {
    area: Rect,
    cells: Vec<Cell>,
    dirty: Option<Rect>,
    /// Hyperlink URL registry (indexed by `Cell::hyperlink_id`).
    hyperlinks: Vec<String>,
    hyperlink_cache: HashMap<String, u16>,
}

impl Buffer {
    /// Allocate a new buffer covering `width x height`, all cells empty, no
    /// dirty region.
    ///
    /// # Panics
    ///
    /// Panics if the requested dimensions exceed `MAX_BUFFER_DIMENSION` or
    /// `MAX_BUFFER_SIZE`. Use [`Buffer::try_new`] to handle this instead,
    /// e.g. when sizing from an untrusted `TIOCGWINSZ` response.
    pub fn new(width: u16, height: u16) -> Self {
        Self::try_new(width, height).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible constructor; see [`Buffer::new`].
    pub fn try_new(width: u16, height: u16) -> Result<Self, BufferError> {
        if width > MAX_BUFFER_DIMENSION {
            return Err(BufferError::InvalidWidth {
                width,
                max: MAX_BUFFER_DIMENSION,
            });
        }
        if height > MAX_BUFFER_DIMENSION {
            return Err(BufferError::InvalidHeight {
                height,
                max: MAX_BUFFER_DIMENSION,
            });
        }
        let size = (width as usize).saturating_mul(height as usize);
        if size > MAX_BUFFER_SIZE {
            return Err(BufferError::InvalidSize {
                size,
                max: MAX_BUFFER_SIZE,
            });
        }
        Ok(Self {
            area: Rect::new(0, 0, width, height),
            cells: vec![Cell::empty(); size],
            dirty: None,
            hyperlinks: Vec::new(),
            hyperlink_cache: HashMap::new(),
        })
    }

    /// This buffer's area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Buffer width in columns.
    pub fn width(&self) -> u16 {
        self.area.width
    }

    /// Buffer height in rows.
    pub fn height(&self) -> u16 {
        self.area.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.area.width || y >= self.area.height {
            return None;
        }
        Some(
            (y as usize)
                .saturating_mul(self.area.width as usize)
                .saturating_add(x as usize),
        )
    }

    /// Read the cell at `(x, y)`. Out-of-bounds returns an empty cell.
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Mutable access to the cell at `(x, y)`, if in bounds.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let idx = self.index(x, y)?;
        Some(&mut self.cells[idx])
    }

    fn mark_dirty(&mut self, x: u16, y: u16) {
        let point = Rect::new(x, y, 1, 1);
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(&point),
            None => point,
        });
    }

    /// Write a cell at `(x, y)`. Out-of-bounds writes are silently ignored.
    /// Extends the dirty region to include `(x, y)`.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
            self.mark_dirty(x, y);
        }
    }

    /// Write `text` starting at `(x, y)`, one `Cell` per grapheme cluster,
    /// respecting East-Asian Wide widths: a width-2 grapheme occupies two
    /// adjacent columns (glyph + width-0 continuation). Clips at the row's
    /// right edge; a wide glyph that would straddle the edge is replaced by
    /// a single space instead of being split.
    ///
    /// Returns the number of columns written.
    pub fn set_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        style: Style,
        hyperlink: Option<&str>,
    ) -> u16 {
        let hyperlink_id = hyperlink.map(|url| self.register_hyperlink(url));
        let mut col = x;
        for grapheme in crate::text::graphemes(text) {
            let w = crate::text::grapheme_width(grapheme).max(1) as u16;
            if col >= self.area.width {
                break;
            }
            if col.saturating_add(w) > self.area.width {
                // Would straddle the row's right edge: emit a blank instead.
                let mut cell = Cell::new(" ").with_style(style);
                cell.hyperlink_id = hyperlink_id;
                self.set(col, y, cell);
                col += 1;
                continue;
            }
            let mut cell = Cell::new(grapheme).with_style(style);
            cell.hyperlink_id = hyperlink_id;
            self.set(col, y, cell);
            if w == 2 {
                let mut cont = Cell::continuation().with_style(style);
                cont.hyperlink_id = hyperlink_id;
                self.set(col + 1, y, cont);
            }
            col += w;
        }
        col - x
    }

    /// Reset every cell to `fill` (or empty, if `None`). The dirty region
    /// becomes the entire buffer.
    pub fn clear(&mut self, fill: Option<Cell>) {
        let fill = fill.unwrap_or_default();
        for c in self.cells.iter_mut() {
            *c = fill;
        }
        self.dirty = Some(self.area);
    }

    /// Write `cell` to every position in the intersection of `rect` and
    /// this buffer's area.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let Some(clipped) = self.area.intersection(&rect) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Overlay `src` onto `self` at `dest_pos`, treating transparent cells
    /// (space, default style, no hyperlink) in `src` as no-ops so windows
    /// composite correctly over whatever is underneath.
    pub fn merge(&mut self, src: &Buffer, dest_pos: crate::geometry::Position) {
        for y in 0..src.height() {
            for x in 0..src.width() {
                let cell = src.get(x, y);
                if cell.is_transparent() {
                    continue;
                }
                let dx = dest_pos.x.saturating_add(x);
                let dy = dest_pos.y.saturating_add(y);
                self.set(dx, dy, cell);
            }
        }
    }

    /// Resize to `new_area`, preserving cells in the intersection of old and
    /// new areas and filling the rest with empty cells. The dirty region
    /// becomes the entire new area.
    pub fn resize(&mut self, width: u16, height: u16) {
        let new_area = Rect::new(0, 0, width, height);
        let mut new_cells = vec![Cell::empty(); (width as usize) * (height as usize)];
        if let Some(overlap) = self.area.intersection(&new_area) {
            for y in overlap.y..overlap.bottom() {
                for x in overlap.x..overlap.right() {
                    let idx = (y as usize) * (width as usize) + (x as usize);
                    new_cells[idx] = self.get(x, y);
                }
            }
        }
        self.cells = new_cells;
        self.area = new_area;
        self.dirty = Some(new_area);
    }

    /// The bounding rect of all writes since the last `clear_dirty`, or
    /// `None` if nothing has been written.
    pub fn dirty_region(&self) -> Option<Rect> {
        self.dirty
    }

    /// Reset the dirty region to empty.
    pub fn clear_dirty(&mut self) {
        self.dirty = None;
    }

    /// Every `(x, y, cell)` in `other` that differs from `self` at the same
    /// position, in row-major order. Stable and deterministic.
    pub fn diff(&self, other: &Buffer) -> Vec<(u16, u16, Cell)> {
        let mut changes = Vec::new();
        for y in 0..self.area.height.min(other.area.height) {
            for x in 0..self.area.width.min(other.area.width) {
                let a = self.get(x, y);
                let b = other.get(x, y);
                if a != b {
                    changes.push((x, y, b));
                }
            }
        }
        changes
    }

    /// Register a hyperlink URL, returning its id. Repeated registrations of
    /// the same URL share an id.
    pub fn register_hyperlink(&mut self, url: &str) -> u16 {
        if let Some(&id) = self.hyperlink_cache.get(url) {
            return id;
        }
        let id = self.hyperlinks.len() as u16;
        self.hyperlinks.push(url.to_string());
        self.hyperlink_cache.insert(url.to_string(), id);
        id
    }

    /// Resolve a hyperlink id back to its URL.
    pub fn get_hyperlink(&self, id: u16) -> Option<&str> {
        self.hyperlinks.get(id as usize).map(String::as_str)
    }

    /// Iterate all cells in row-major order as `(x, y, &Cell)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.area.width;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width.max(1) as usize) as u16;
            let y = (i / width.max(1) as usize) as u16;
            (x, y, cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::style::Color;

    #[test]
    fn new_buffer_has_empty_cells_and_no_dirty_region() {
        let buf = Buffer::new(3, 2);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.get(0, 0).symbol(), " ");
        assert!(buf.dirty_region().is_none());
    }

    #[test]
    fn set_extends_dirty_region() {
        let mut buf = Buffer::new(10, 10);
        buf.set(3, 4, Cell::new("x"));
        assert_eq!(buf.dirty_region(), Some(Rect::new(3, 4, 1, 1)));
        buf.set(5, 1, Cell::new("y"));
        assert_eq!(buf.dirty_region(), Some(Rect::new(3, 1, 3, 4)));
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(99, 99, Cell::new("x"));
        assert!(buf.dirty_region().is_none());
    }

    #[test]
    fn set_string_places_wide_glyph_and_continuation() {
        let mut buf = Buffer::new(5, 1);
        let written = buf.set_string(0, 0, "\u{4E2D}a", Style::default(), None);
        assert_eq!(written, 3); // wide glyph (2 cols) + 'a' (1 col)
        assert_eq!(buf.get(0, 0).symbol(), "\u{4E2D}");
        assert!(buf.get(1, 0).is_continuation());
        assert_eq!(buf.get(2, 0).symbol(), "a");
    }

    #[test]
    fn set_string_clips_at_right_edge() {
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "Hello", Style::default(), None);
        assert_eq!(buf.get(0, 0).symbol(), "H");
        assert_eq!(buf.get(2, 0).symbol(), "l");
    }

    #[test]
    fn set_string_replaces_straddling_wide_glyph_with_space() {
        let mut buf = Buffer::new(2, 1);
        buf.set_string(1, 0, "\u{4E2D}", Style::default(), None);
        assert_eq!(buf.get(1, 0).symbol(), " ");
    }

    #[test]
    fn clear_resets_cells_and_marks_whole_buffer_dirty() {
        let mut buf = Buffer::new(4, 4);
        buf.set(0, 0, Cell::new("x"));
        buf.clear(None);
        assert_eq!(buf.get(0, 0).symbol(), " ");
        assert_eq!(buf.dirty_region(), Some(buf.area()));
    }

    #[test]
    fn fill_writes_intersection_only() {
        let mut buf = Buffer::new(4, 4);
        buf.fill(Rect::new(2, 2, 10, 10), Cell::new("x"));
        assert_eq!(buf.get(3, 3).symbol(), "x");
        assert_eq!(buf.get(1, 1).symbol(), " ");
    }

    #[test]
    fn merge_skips_transparent_cells() {
        let mut dest = Buffer::new(4, 4);
        dest.set(0, 0, Cell::new("D"));
        let mut src = Buffer::new(4, 4);
        src.set(1, 1, Cell::new("S").fg(Color::Indexed(1)));
        dest.merge(&src, Position::new(0, 0));
        assert_eq!(dest.get(0, 0).symbol(), "D"); // untouched by transparent src cell
        assert_eq!(dest.get(1, 1).symbol(), "S");
    }

    #[test]
    fn resize_preserves_intersection() {
        let mut buf = Buffer::new(4, 4);
        buf.set(1, 1, Cell::new("x"));
        buf.resize(8, 2);
        assert_eq!(buf.get(1, 1).symbol(), "x");
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.dirty_region(), Some(buf.area()));
    }

    #[test]
    fn clear_dirty_resets_to_empty() {
        let mut buf = Buffer::new(4, 4);
        buf.set(0, 0, Cell::new("x"));
        buf.clear_dirty();
        assert!(buf.dirty_region().is_none());
    }

    #[test]
    fn diff_of_buffer_with_itself_is_empty() {
        let mut buf = Buffer::new(4, 4);
        buf.set(0, 0, Cell::new("x"));
        let clone = buf.clone();
        assert!(buf.diff(&clone).is_empty());
    }

    #[test]
    fn diff_completeness() {
        let a = Buffer::new(3, 3);
        let mut b = Buffer::new(3, 3);
        b.set(1, 1, Cell::new("Z"));
        let changes = a.diff(&b);
        let mut applied = a.clone();
        for (x, y, cell) in changes {
            applied.set(x, y, cell);
        }
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(applied.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn register_hyperlink_dedupes_by_url() {
        let mut buf = Buffer::new(4, 4);
        let a = buf.register_hyperlink("https://example.com");
        let b = buf.register_hyperlink("https://example.com");
        assert_eq!(a, b);
        assert_eq!(buf.get_hyperlink(a), Some("https://example.com"));
    }

    #[test]
    fn try_new_rejects_pathological_dimensions() {
        assert!(matches!(
            Buffer::try_new(u16::MAX, u16::MAX),
            Err(BufferError::InvalidWidth { .. })
        ));
    }
}
