//! Buffer diff algorithm: the set of per-cell changes needed to turn one
//! frame's screen contents into the next.

use super::{Buffer, Cell};
use crate::geometry::Rect;

/// A single cell change to be applied to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// X coordinate (column)
    pub x: u16,
    /// Y coordinate (row)
    pub y: u16,
    /// The new cell value.
    pub cell: Cell,
}

/// Compute the differences between two buffers, scoped to `dirty_rects`.
///
/// An empty `dirty_rects` slice falls back to a full-screen comparison —
/// the dirty-rect list is an optimization over [`Buffer::diff`]'s exhaustive
/// comparison, not a correctness requirement, so callers that haven't
/// tracked dirty regions still get a correct (if slower) diff.
pub fn diff(old: &Buffer, new: &Buffer, dirty_rects: &[Rect]) -> Vec<Change> {
    if dirty_rects.is_empty() {
        let full_screen = Rect::new(0, 0, new.width(), new.height());
        return diff(old, new, std::slice::from_ref(&full_screen));
    }

    let merged = crate::geometry::merge_rects(dirty_rects);
    let mut changes = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for rect in &merged {
        let y_end = rect.y.saturating_add(rect.height).min(new.height());
        let x_end = rect.x.saturating_add(rect.width).min(new.width());

        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if !seen.insert((x, y)) {
                    continue;
                }
                let old_cell = old.get(x, y);
                let new_cell = new.get(x, y);
                if old_cell != new_cell {
                    changes.push(Change {
                        x,
                        y,
                        cell: new_cell,
                    });
                    // A wide cell that narrowed leaves its neighbor's display
                    // width stale even when that neighbor's own value didn't
                    // change, so it must be forced into the diff too.
                    if old_cell.width == 2 && new_cell.width != 2 {
                        let nx = x + 1;
                        if nx < x_end && seen.insert((nx, y)) {
                            changes.push(Change {
                                x: nx,
                                y,
                                cell: new.get(nx, y),
                            });
                        }
                    }
                }
            }
        }
    }
    changes
}
