//! The differential-render algorithm: turn a buffer diff into a minimal
//! stream of ANSI bytes, tracking emitted cursor position, SGR style, and
//! hyperlink state so unchanged attributes are never re-sent.

use super::cursor::CursorManager;
use super::diff::Change;
use super::terminal::wire;
use super::Buffer;
use crate::style::{Color, Modifier};
use crate::Result;
use std::io::Write;

/// Tracks what has actually been sent to the terminal so far this frame,
/// mirroring the cell attributes the terminal itself now holds.
#[derive(Default)]
struct EmitState {
    fg: Option<Color>,
    bg: Option<Color>,
    modifier: Modifier,
    hyperlink_id: Option<u16>,
    cursor: Option<(u16, u16)>,
    /// Whether any non-continuation cell has been drawn yet this render —
    /// the trailing SGR reset fires once iff this is true, regardless of
    /// whether the cells drawn actually used a non-default style.
    drew_cell: bool,
}

/// Renders buffer diffs to a writer as ANSI byte sequences.
///
/// Holds no terminal ownership itself (see [`super::terminal::TerminalDriver`]
/// for raw-mode setup) — it is purely the diff-to-bytes transform, so it can
/// be unit tested against an in-memory `Vec<u8>`.
pub struct Renderer {
    cursor: CursorManager,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer with a fresh, hidden cursor at the origin.
    pub fn new() -> Self {
        Self {
            cursor: CursorManager::new(),
        }
    }

    /// Mutable access to the logical cursor, so callers can move/show/hide
    /// it before the next render.
    pub fn cursor_mut(&mut self) -> &mut CursorManager {
        &mut self.cursor
    }

    /// Emit `changes` to `writer`, then the cursor compositing sequence.
    /// `buffer` resolves hyperlink ids to URLs for cells that carry one.
    pub fn render<W: Write>(
        &mut self,
        writer: &mut W,
        changes: &[Change],
        buffer: &Buffer,
    ) -> Result<()> {
        let mut state = EmitState::default();

        for change in changes {
            if change.cell.is_continuation() {
                continue;
            }
            let hyperlink_url = change
                .cell
                .hyperlink_id
                .and_then(|id| buffer.get_hyperlink(id));
            self.draw_cell(writer, change.x, change.y, &change.cell, hyperlink_url, &mut state)?;
        }

        if state.hyperlink_id.is_some() {
            write!(writer, "{}", wire::hyperlink_end())?;
        }
        if state.drew_cell {
            write!(writer, "{}", wire::SGR_RESET)?;
        }

        self.render_cursor(writer)?;
        writer.flush()?;
        Ok(())
    }

    fn draw_cell<W: Write>(
        &mut self,
        writer: &mut W,
        x: u16,
        y: u16,
        cell: &super::Cell,
        hyperlink_url: Option<&str>,
        state: &mut EmitState,
    ) -> Result<()> {
        if state.cursor != Some((x, y)) {
            write!(writer, "{}", wire::move_to(y + 1, x + 1))?;
        }

        if cell.hyperlink_id != state.hyperlink_id {
            if state.hyperlink_id.is_some() {
                write!(writer, "{}", wire::hyperlink_end())?;
            }
            if let Some(url) = hyperlink_url {
                write!(writer, "{}", wire::hyperlink_start(url))?;
            }
            state.hyperlink_id = cell.hyperlink_id;
        }

        if cell.fg != state.fg || cell.bg != state.bg || cell.modifier != state.modifier {
            // Style changed: a minimal diff would selectively reset only
            // the attributes that dropped out, but SGR has no "unset bold"
            // short of a full reset, so any change resets and re-applies —
            // except the very first style of the render, where the
            // emitter's own default state already matches a bare reset.
            let previously_non_default =
                state.fg.is_some() || state.bg.is_some() || !state.modifier.is_empty();
            if previously_non_default {
                write!(writer, "{}", wire::SGR_RESET)?;
            }
            if let Some(seq) = wire::sgr_params(cell.fg, cell.bg, cell.modifier) {
                write!(writer, "{seq}")?;
            }
            state.fg = cell.fg;
            state.bg = cell.bg;
            state.modifier = cell.modifier;
        }

        write!(writer, "{}", cell.symbol())?;
        state.cursor = Some((x.saturating_add(cell.width as u16), y));
        state.drew_cell = true;
        Ok(())
    }

    fn render_cursor<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.cursor.is_visible() {
            let (x, y) = self.cursor.position();
            write!(writer, "{}", wire::move_to(y + 1, x + 1))?;
            if self.cursor.style_changed() {
                if let Some(n) = self.cursor.style().decscusr_param() {
                    write!(writer, "{}", wire::cursor_style(n))?;
                }
                self.cursor.mark_emitted();
            }
            write!(writer, "{}", wire::CURSOR_SHOW)?;
        } else {
            write!(writer, "{}", wire::CURSOR_HIDE)?;
        }
        Ok(())
    }
}
