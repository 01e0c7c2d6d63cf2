//! Application-facing API (§6): a builder and run loop that wire the
//! terminal driver, input decoder, tick loop, and differential renderer
//! into a single blocking event/render cycle.
//!
//! This is the layer a caller actually touches. Everything below it (the
//! buffer, the decoder, the tick loop, the window manager) is usable on
//! its own, but `App` is what most programs reach for first.

use crate::core::constants::{DEFAULT_TARGET_FPS, ESCAPE_DISAMBIGUATION};
use crate::event::{Decoder, EventReader};
use crate::geometry::{Rect, Size};
use crate::render::diff;
use crate::render::terminal::{wire, TerminalDriver, TerminalFeatures};
use crate::render::{Buffer, Renderer};
use crate::tick::TickLoop;
use crate::window::WindowManager;
use crate::{Event, Result};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Startup configuration for an [`App`].
///
/// Mirrors the teacher's `App::builder()` shape: a plain struct with a
/// `Default` impl safe for an 80x24 terminal, plus chained setters.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title, set via OSC 0 on startup if non-empty.
    pub title: String,
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Enable SGR mouse reporting.
    pub mouse_capture: bool,
    /// Put the tty into raw mode.
    pub raw_mode: bool,
    /// Enable the window manager (z-ordered windows instead of a single
    /// full-screen render handler).
    pub window_mode: bool,
    /// Enable bracketed paste mode.
    pub bracketed_paste: bool,
    /// Enable focus in/out reporting.
    pub focus_events: bool,
    /// Target frames per second for the tick loop's render gate.
    pub target_fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            alternate_screen: true,
            mouse_capture: false,
            raw_mode: true,
            window_mode: false,
            bracketed_paste: false,
            focus_events: false,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl AppConfig {
    /// A config with the default (80x24-safe) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Toggle the alternate screen buffer.
    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    /// Toggle SGR mouse reporting.
    pub fn mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    /// Toggle raw mode.
    pub fn raw_mode(mut self, enabled: bool) -> Self {
        self.raw_mode = enabled;
        self
    }

    /// Toggle the window manager.
    pub fn window_mode(mut self, enabled: bool) -> Self {
        self.window_mode = enabled;
        self
    }

    /// Toggle bracketed paste mode.
    pub fn bracketed_paste(mut self, enabled: bool) -> Self {
        self.bracketed_paste = enabled;
        self
    }

    /// Toggle focus in/out reporting.
    pub fn focus_events(mut self, enabled: bool) -> Self {
        self.focus_events = enabled;
        self
    }

    /// Set the target frames per second.
    pub fn target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    fn terminal_features(&self) -> TerminalFeatures {
        TerminalFeatures {
            alternate_screen: self.alternate_screen,
            raw_mode: self.raw_mode,
            mouse_capture: self.mouse_capture,
            bracketed_paste: self.bracketed_paste,
            focus_events: self.focus_events,
        }
    }
}

type EventHandler = Box<dyn FnMut(&Event) -> bool>;
type RenderHandler = Box<dyn FnMut(&mut Buffer)>;

/// Ties together a [`TerminalDriver`], [`Decoder`], [`TickLoop`], and
/// [`Renderer`] into the blocking scheduling model of §5.
///
/// Owns two buffers: `back` is what the registered render handler (and, in
/// window mode, the [`WindowManager`]) draws into each frame; `front` is
/// what the terminal last actually displayed. Rendering diffs `back`
/// against `front` and only ever sends the difference.
pub struct App<W: Write> {
    config: AppConfig,
    driver: TerminalDriver<W>,
    renderer: Renderer,
    decoder: Decoder,
    reader: Arc<EventReader>,
    tick: TickLoop,
    front: Buffer,
    back: Buffer,
    windows: WindowManager,
    event_handler: Option<EventHandler>,
    render_handler: Option<RenderHandler>,
    /// When the decoder first latched onto a bare `ESC` still waiting to
    /// learn whether it's the start of a CSI/SS3 sequence. Cleared once the
    /// decoder leaves that state, by either more bytes or our own timeout.
    escape_since: Option<Instant>,
}

impl App<io::Stdout> {
    /// An app writing to stdout, reading input and termios from stdin.
    pub fn new(config: AppConfig) -> Result<Self> {
        let driver = TerminalDriver::stdout(config.terminal_features())?;
        Self::with_driver(config, driver, EventReader::stdin())
    }
}

impl<W: Write> App<W> {
    /// Build an app around an already-constructed `driver` and `reader`,
    /// for tests or alternate I/O targets.
    pub fn with_driver(config: AppConfig, mut driver: TerminalDriver<W>, reader: EventReader) -> Result<Self> {
        let size = driver.size().unwrap_or(Size::new(80, 24));

        if !config.title.is_empty() {
            write!(driver.writer_mut(), "{}", wire::window_title(&config.title))?;
            driver.writer_mut().flush()?;
        }

        Ok(Self {
            tick: TickLoop::new(config.target_fps),
            front: Buffer::new(size.width, size.height),
            back: Buffer::new(size.width, size.height),
            windows: WindowManager::new(),
            renderer: Renderer::new(),
            decoder: Decoder::new(),
            reader: Arc::new(reader),
            event_handler: None,
            render_handler: None,
            escape_since: None,
            config,
            driver,
        })
    }

    /// Register the event handler: called with every decoded [`Event`],
    /// returning `false` stops the app after this tick.
    pub fn on_event(&mut self, handler: impl FnMut(&Event) -> bool + 'static) {
        self.event_handler = Some(Box::new(handler));
    }

    /// Register the render handler: called once per rendered frame with
    /// mutable access to the back buffer.
    pub fn on_render(&mut self, handler: impl FnMut(&mut Buffer) + 'static) {
        self.render_handler = Some(Box::new(handler));
    }

    /// Request shutdown, observed at the top of the next tick.
    pub fn quit(&mut self) {
        self.tick.quit();
    }

    /// Temporarily leave raw mode and the alternate screen (e.g. to hand
    /// the terminal to a child process), restoring on [`App::resume`].
    pub fn suspend(&mut self) -> Result<()> {
        self.driver.suspend()
    }

    /// Re-enter raw mode and the alternate screen after [`App::suspend`].
    pub fn resume(&mut self) -> Result<()> {
        self.driver.resume()
    }

    /// Add a window to the window manager, returning its id.
    pub fn add_window(&mut self, window: crate::window::Window) -> crate::window::WindowId {
        self.windows.add_window(window)
    }

    /// Remove a window by id.
    pub fn remove_window(&mut self, id: crate::window::WindowId) -> bool {
        self.windows.remove_window(id)
    }

    /// Focus a window by id.
    pub fn focus_window(&mut self, id: crate::window::WindowId) -> bool {
        self.windows.focus_window(id)
    }

    /// The currently focused window, if any.
    pub fn get_focused_window(&self) -> Option<&crate::window::Window> {
        self.windows.focused_window()
    }

    /// All windows, back to front.
    pub fn get_windows(&self) -> &[crate::window::Window] {
        self.windows.windows()
    }

    /// Run the blocking tick loop (§5) until the event handler returns
    /// `false`, an [`Event::Quit`] is decoded, or [`App::quit`] is called.
    ///
    /// Each tick: observe any pending resize, wait up to the governor's
    /// poll timeout for input, drain up to [`TickLoop::max_events_per_tick`]
    /// decoded events, then render if a frame is due. A bare `ESC` resolves
    /// to `Key(Escape)` after its own fixed 20ms window, not the frame's
    /// poll timeout.
    pub fn run(&mut self) -> Result<()> {
        self.render_frame(true)?;

        loop {
            if self.tick.is_shutting_down() {
                break;
            }

            if self.tick.take_resize() {
                let size = self.driver.size().unwrap_or_else(|_| self.front.area().size());
                self.handle_resize(size);
            }

            let timeout = self.tick.poll_timeout();
            if self.reader.has_input(timeout) {
                self.drain_input();
            } else if self.decoder.is_escape_pending() {
                let elapsed = self.escape_since.is_some_and(|t| t.elapsed() >= ESCAPE_DISAMBIGUATION);
                if elapsed {
                    if let Some(event) = self.decoder.timeout_escape() {
                        self.escape_since = None;
                        self.dispatch_event(&event);
                    }
                }
            }

            // Track the 20ms escape-vs-CSI disambiguation window (§4.4)
            // independently of the frame's poll timeout: a bare ESC only
            // resolves once this much wall-clock time has actually passed
            // since it arrived, not merely "no input this tick".
            if self.decoder.is_escape_pending() {
                self.escape_since.get_or_insert_with(Instant::now);
            } else {
                self.escape_since = None;
            }

            if self.tick.should_render() {
                self.render_frame(false)?;
                self.tick.end_frame();
            }
        }

        Ok(())
    }

    fn drain_input(&mut self) {
        let mut drained = 0;
        while drained < self.tick.max_events_per_tick() {
            if !self.reader.has_input(Duration::ZERO) {
                break;
            }
            let Some(byte) = self.reader.read_byte() else {
                break;
            };
            if let Some(event) = self.decoder.step(byte) {
                self.dispatch_event(&event);
                drained += 1;
            }
        }
    }

    fn dispatch_event(&mut self, event: &Event) {
        if let Event::Resize(cols, rows) = event {
            self.handle_resize(Size::new(*cols, *rows));
        }
        if matches!(event, Event::Quit) {
            self.tick.quit();
            return;
        }

        let consumed = self.config.window_mode && self.windows.dispatch(event);
        if consumed {
            return;
        }

        let keep_going = match &mut self.event_handler {
            Some(handler) => handler(event),
            None => true,
        };
        if !keep_going {
            self.tick.quit();
        }
    }

    fn handle_resize(&mut self, size: Size) {
        crate::log_debug!("resize to {}x{}", size.width, size.height);
        self.front.resize(size.width, size.height);
        self.back.resize(size.width, size.height);
    }

    /// Render one frame. `force` paints every cell regardless of dirty
    /// state, preceded by a full clear (used for the first frame and after
    /// `resume()`); otherwise only the back buffer's dirty region is sent.
    fn render_frame(&mut self, force: bool) -> Result<()> {
        self.back.clear(None);
        if let Some(handler) = &mut self.render_handler {
            handler(&mut self.back);
        }
        if self.config.window_mode {
            self.windows.render(&mut self.back);
        }

        let full_screen = Rect::new(0, 0, self.back.width(), self.back.height());
        let dirty_rects: Vec<Rect> = if force {
            vec![full_screen]
        } else {
            self.back.dirty_region().into_iter().collect()
        };

        if dirty_rects.is_empty() {
            self.back.clear_dirty();
            return Ok(());
        }

        let changes = if force {
            diff::diff(&Buffer::new(self.back.width(), self.back.height()), &self.back, &dirty_rects)
        } else {
            diff::diff(&self.front, &self.back, &dirty_rects)
        };

        if !changes.is_empty() {
            if force {
                write!(self.driver.writer_mut(), "{}", wire::CLEAR_SCREEN)?;
            }
            write!(self.driver.writer_mut(), "{}", wire::SYNC_OUTPUT_BEGIN)?;
            self.renderer
                .render(self.driver.writer_mut(), &changes, &self.back)?;
            write!(self.driver.writer_mut(), "{}", wire::SYNC_OUTPUT_END)?;
            self.driver.writer_mut().flush()?;
        }

        self.front = self.back.clone();
        self.back.clear_dirty();
        Ok(())
    }
}
