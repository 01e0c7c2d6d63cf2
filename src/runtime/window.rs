//! Z-ordered window manager: a stack of rectangular surfaces with focus,
//! hit-testing, bring-to-front, border compositing, and per-window event
//! routing (§4.6).

use crate::event::{Event, MouseEvent};
use crate::geometry::{Position, Rect, Size};
use crate::render::{Buffer, Cell};
use crate::style::Style;

/// A window's identity, unique and monotonically issued by the
/// [`WindowManager`] that owns it.
pub type WindowId = u64;

/// The box-drawing characters a [`Border`] paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Horizontal edge (top/bottom).
    pub horizontal: char,
    /// Vertical edge (left/right).
    pub vertical: char,
}

impl BorderChars {
    /// Single-line box-drawing characters.
    pub const PLAIN: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded-corner box-drawing characters.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// Double-line box-drawing characters.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A window's border: which edges are drawn, with which characters and
/// style. Corners are only drawn where both adjacent edges are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Glyphs used to draw the border.
    pub chars: BorderChars,
    /// Style applied to every border cell.
    pub style: Style,
    /// Draw the top edge.
    pub top: bool,
    /// Draw the bottom edge.
    pub bottom: bool,
    /// Draw the left edge.
    pub left: bool,
    /// Draw the right edge.
    pub right: bool,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            chars: BorderChars::default(),
            style: Style::default(),
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

/// A window's lifecycle state. Minimized and Hidden windows are skipped by
/// both rendering and event routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// Rendered and routable.
    #[default]
    Normal,
    /// Not rendered, not routable, but still present in the window list.
    Minimized,
    /// Not rendered, not routable.
    Hidden,
}

/// Returns `true` if the window consumed the event.
type KeyHandler = Box<dyn FnMut(&Event) -> bool>;
/// Returns `true` if the window consumed the event.
type MouseHandler = Box<dyn FnMut(&MouseEvent) -> bool>;
type ResizeHandler = Box<dyn FnMut(Size)>;

/// An owned rectangular surface with its own content buffer, an optional
/// border, and optional event handlers.
///
/// Handlers are plain closures rather than references into application
/// state (per §9's cyclic-ownership note): a handler that needs to mutate
/// shared state should capture a `Rc<RefCell<_>>`/channel sender, not a
/// direct borrow, since the window outlives any single borrow of its owner.
pub struct Window {
    id: WindowId,
    area: Rect,
    title: String,
    border: Option<Border>,
    content: Buffer,
    visible: bool,
    focused: bool,
    state: WindowState,
    modal: bool,
    on_key: Option<KeyHandler>,
    on_mouse: Option<MouseHandler>,
    on_resize: Option<ResizeHandler>,
}

impl Window {
    /// A new window covering `area`, content buffer sized to its interior.
    /// Not yet tracked by any manager; `id` is assigned by
    /// [`WindowManager::add_window`].
    pub fn new(area: Rect, title: impl Into<String>) -> Self {
        let content_area = content_area(area, None);
        Self {
            id: 0,
            area,
            title: title.into(),
            border: None,
            content: Buffer::new(content_area.width, content_area.height),
            visible: true,
            focused: false,
            state: WindowState::Normal,
            modal: false,
            on_key: None,
            on_mouse: None,
            on_resize: None,
        }
    }

    /// Give the window a border, resizing its content buffer to the new
    /// interior.
    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self.resync_content_buffer();
        self
    }

    /// Request auto-focus when added to a manager (the manager still
    /// applies this — see [`WindowManager::add_window`]).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Mark the window modal: a `Key` event reaching this window while it is
    /// focused is always reported consumed, even if its handler declines it,
    /// so it never falls through to the application's own event handler.
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Set the initial visibility/minimized/hidden state.
    pub fn state(mut self, state: WindowState) -> Self {
        self.state = state;
        self
    }

    /// Register the key handler, offered events when this window is
    /// focused.
    pub fn on_key(mut self, handler: impl FnMut(&Event) -> bool + 'static) -> Self {
        self.on_key = Some(Box::new(handler));
        self
    }

    /// Register the mouse handler, offered events (in window-local
    /// coordinates) when the pointer is over this window.
    pub fn on_mouse(mut self, handler: impl FnMut(&MouseEvent) -> bool + 'static) -> Self {
        self.on_mouse = Some(Box::new(handler));
        self
    }

    /// Register the resize handler, offered the terminal's new size
    /// whenever a `Resize` event is broadcast.
    pub fn on_resize(mut self, handler: impl FnMut(Size) + 'static) -> Self {
        self.on_resize = Some(Box::new(handler));
        self
    }

    /// This window's id, or 0 if not yet added to a manager.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// The window's outer rect.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// The interior rect after border inset. `buffer.area() ==
    /// content_area` whenever the window is visible.
    pub fn content_area(&self) -> Rect {
        content_area(self.area, self.border.as_ref())
    }

    /// The window's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Mutable access to the content buffer, for painting this window's
    /// contents each frame.
    pub fn content_mut(&mut self) -> &mut Buffer {
        &mut self.content
    }

    /// Read-only access to the content buffer.
    pub fn content(&self) -> &Buffer {
        &self.content
    }

    /// True iff the window is visible (its [`WindowState`] is `Normal`) and
    /// its explicit visibility flag is set.
    pub fn is_visible(&self) -> bool {
        self.visible && matches!(self.state, WindowState::Normal)
    }

    /// Set the explicit visibility flag, independent of [`WindowState`].
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Current lifecycle state.
    pub fn window_state(&self) -> WindowState {
        self.state
    }

    /// Set the lifecycle state.
    pub fn set_window_state(&mut self, state: WindowState) {
        self.state = state;
    }

    /// True iff this window currently holds focus, per its owning manager.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// True iff this window is modal.
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.resync_content_buffer();
    }

    fn resync_content_buffer(&mut self) {
        let content_area = self.content_area();
        self.content.resize(content_area.width, content_area.height);
    }
}

fn content_area(area: Rect, border: Option<&Border>) -> Rect {
    let Some(border) = border else {
        return area;
    };
    let left = border.left as u16;
    let right = border.right as u16;
    let top = border.top as u16;
    let bottom = border.bottom as u16;
    Rect {
        x: area.x.saturating_add(left),
        y: area.y.saturating_add(top),
        width: area.width.saturating_sub(left + right),
        height: area.height.saturating_sub(top + bottom),
    }
}

/// An ordered collection of [`Window`]s: `windows[len-1]` is topmost.
///
/// At most one window is focused at a time; the invariant "exactly one
/// focused visible window whenever ≥1 visible window exists and focus has
/// ever been set" (§8 property 5) is maintained by every mutating method
/// below, not just `focus_window`.
#[derive(Default)]
pub struct WindowManager {
    windows: Vec<Window>,
    next_id: WindowId,
    focused: Option<WindowId>,
}

impl WindowManager {
    /// An empty window manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `window`, assigning it a fresh id. Auto-focuses it if the list
    /// was previously empty, or if `window` was built with
    /// `.focused(true)`. Returns the assigned id.
    pub fn add_window(&mut self, mut window: Window) -> WindowId {
        self.next_id += 1;
        let id = self.next_id;
        window.id = id;
        let should_focus = self.windows.is_empty() || window.focused;
        self.windows.push(window);
        if should_focus {
            self.focus_window(id);
        }
        id
    }

    /// Remove the window with `id`, if present. If it was focused, focus
    /// moves to the new topmost visible window (or `None`). Returns whether
    /// a window was removed.
    pub fn remove_window(&mut self, id: WindowId) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.id == id) else {
            return false;
        };
        self.windows.remove(index);
        if self.focused == Some(id) {
            self.focused = None;
            if let Some(next) = self.topmost_visible_id() {
                self.focus_window(next);
            }
        }
        true
    }

    /// Clear focus on every window, then focus `id` and bring it to front
    /// if it exists and is visible. Returns whether focus was applied.
    pub fn focus_window(&mut self, id: WindowId) -> bool {
        for w in &mut self.windows {
            w.focused = false;
        }
        let Some(index) = self.windows.iter().position(|w| w.id == id) else {
            self.focused = None;
            return false;
        };
        if !self.windows[index].is_visible() {
            self.focused = None;
            return false;
        }
        let mut window = self.windows.remove(index);
        window.focused = true;
        self.windows.push(window);
        self.focused = Some(id);
        true
    }

    /// Move the window with `id` to the back of the z-order (index 0).
    pub fn send_to_back(&mut self, id: WindowId) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.id == id) else {
            return false;
        };
        let window = self.windows.remove(index);
        self.windows.insert(0, window);
        true
    }

    /// Move the window's rect to a new top-left position. Does not
    /// validate against any parent bounds.
    pub fn move_window(&mut self, id: WindowId, pos: Position) {
        if let Some(w) = self.window_mut(id) {
            let area = Rect::from_position_size(pos, w.area.size());
            w.set_area(area);
        }
    }

    /// Resize the window's rect, resizing its content buffer to match.
    /// Does not validate against any parent bounds.
    pub fn resize_window(&mut self, id: WindowId, size: Size) {
        if let Some(w) = self.window_mut(id) {
            let area = Rect::from_position_size(w.area.top_left(), size);
            w.set_area(area);
        }
    }

    /// The topmost visible window whose area contains `position`, if any.
    pub fn find_at(&self, position: Position) -> Option<&Window> {
        self.windows
            .iter()
            .rev()
            .find(|w| w.is_visible() && w.area.contains(position))
    }

    fn topmost_visible_id(&self) -> Option<WindowId> {
        self.windows.iter().rev().find(|w| w.is_visible()).map(|w| w.id)
    }

    /// Look up a window by id.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Mutable lookup by id.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    /// The currently focused window, if any.
    pub fn focused_window(&self) -> Option<&Window> {
        self.focused.and_then(|id| self.window(id))
    }

    /// Mutable access to the currently focused window, if any.
    pub fn focused_window_mut(&mut self) -> Option<&mut Window> {
        self.focused.and_then(move |id| self.windows.iter_mut().find(|w| w.id == id))
    }

    /// All windows, back to front.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Route `event` to the appropriate window(s) per §4.6's event-routing
    /// table. Returns `true` if some window's handler reported the event
    /// consumed.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match event {
            Event::Key { .. } => {
                let Some(id) = self.focused else { return false };
                let Some(w) = self.window_mut(id) else { return false };
                let consumed = match &mut w.on_key {
                    Some(handler) => handler(event),
                    None => false,
                };
                // A modal focused window swallows every key regardless of
                // what its handler reports, so an unconsumed key never
                // reaches the application's own event handler (§4.6).
                consumed || w.is_modal()
            }
            Event::Mouse(mouse) => self.dispatch_mouse(mouse),
            Event::Resize(cols, rows) => {
                let size = Size::new(*cols, *rows);
                for w in &mut self.windows {
                    if let Some(handler) = &mut w.on_resize {
                        handler(size);
                    }
                }
                false
            }
            _ => false,
        }
    }

    fn dispatch_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let position = Position::new(mouse.x, mouse.y);
        let Some(index) = self
            .windows
            .iter()
            .rposition(|w| w.is_visible() && w.area.contains(position))
        else {
            return false;
        };
        let w = &mut self.windows[index];
        let content_origin = w.content_area().top_left();
        let mut local = *mouse;
        local.x = mouse.x.saturating_sub(content_origin.x);
        local.y = mouse.y.saturating_sub(content_origin.y);
        match &mut w.on_mouse {
            Some(handler) => handler(&local),
            None => false,
        }
    }

    /// Composite every visible window, bottom to top, onto `dest` per
    /// §4.6's render algorithm: scratch buffer, border, title, content
    /// merge, then merge the scratch buffer onto `dest`.
    pub fn render(&self, dest: &mut Buffer) {
        for window in &self.windows {
            if !window.is_visible() {
                continue;
            }
            let mut scratch = Buffer::new(window.area.width, window.area.height);
            if let Some(border) = &window.border {
                draw_border(&mut scratch, border, &window.title);
            }
            let local_origin = Position::new(
                window.content_area().x.saturating_sub(window.area.x),
                window.content_area().y.saturating_sub(window.area.y),
            );
            scratch.merge(&window.content, local_origin);
            dest.merge(&scratch, window.area.top_left());
        }
    }
}

fn draw_border(buf: &mut Buffer, border: &Border, title: &str) {
    let width = buf.width();
    let height = buf.height();
    if width == 0 || height == 0 {
        return;
    }
    let style = border.style;
    let chars = border.chars;

    if border.top {
        for x in 0..width {
            buf.set(x, 0, Cell::new(&chars.horizontal.to_string()).with_style(style));
        }
    }
    if border.bottom && height > 0 {
        let y = height - 1;
        for x in 0..width {
            buf.set(x, y, Cell::new(&chars.horizontal.to_string()).with_style(style));
        }
    }
    if border.left {
        for y in 0..height {
            buf.set(0, y, Cell::new(&chars.vertical.to_string()).with_style(style));
        }
    }
    if border.right && width > 0 {
        let x = width - 1;
        for y in 0..height {
            buf.set(x, y, Cell::new(&chars.vertical.to_string()).with_style(style));
        }
    }
    if border.top && border.left {
        buf.set(0, 0, Cell::new(&chars.top_left.to_string()).with_style(style));
    }
    if border.top && border.right {
        buf.set(width - 1, 0, Cell::new(&chars.top_right.to_string()).with_style(style));
    }
    if border.bottom && border.left {
        buf.set(0, height - 1, Cell::new(&chars.bottom_left.to_string()).with_style(style));
    }
    if border.bottom && border.right {
        buf.set(
            width - 1,
            height - 1,
            Cell::new(&chars.bottom_right.to_string()).with_style(style),
        );
    }

    if border.top && !title.is_empty() && width > 3 {
        // Title starts at column 2 (inset by 2 from the left border) and
        // runs up to but not including the right border column, so the
        // available width is `width - 2 (inset) - 1 (right border)`.
        let max_title_width = (width - 3) as usize;
        let truncated = crate::text::truncate_with_ellipsis(title, max_title_width);
        buf.set_string(2, 0, &truncated, style, None);
    }
}
