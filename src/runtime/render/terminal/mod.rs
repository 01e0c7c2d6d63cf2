//! Raw-mode setup, alternate screen, DEC private modes, and window-size
//! queries for a Unix controlling terminal.

pub mod wire;

use crate::geometry::Size;
use crate::{Error, Result};
use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// True if a SIGWINCH has arrived since the last call, clearing the flag.
/// Signal-safe: the handler only performs a relaxed atomic store.
pub fn take_resize_pending() -> bool {
    RESIZE_PENDING.swap(false, Ordering::Relaxed)
}

/// Simulate a `SIGWINCH` delivery without installing the real signal
/// handler, for tests that exercise resize-observation logic.
#[cfg(test)]
pub(crate) fn bump_resize_generation() {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// Install the SIGWINCH handler. Idempotent; safe to call more than once.
pub fn install_resize_handler() -> io::Result<()> {
    unsafe {
        let rc = libc::signal(libc::SIGWINCH, handle_sigwinch as libc::sighandler_t);
        if rc == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Query the controlling terminal's size via `TIOCGWINSZ`.
pub fn terminal_size(fd: RawFd) -> io::Result<Size> {
    #[repr(C)]
    struct Winsize {
        ws_row: libc::c_ushort,
        ws_col: libc::c_ushort,
        ws_xpixel: libc::c_ushort,
        ws_ypixel: libc::c_ushort,
    }
    let mut ws: Winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws as *mut Winsize) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Size::new(ws.ws_col, ws.ws_row))
}

/// Features a driver may toggle on setup; all default off except `raw_mode`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalFeatures {
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Put the tty into raw mode (no echo, no line buffering, no signals).
    pub raw_mode: bool,
    /// Enable SGR mouse reporting.
    pub mouse_capture: bool,
    /// Enable bracketed paste mode.
    pub bracketed_paste: bool,
    /// Enable focus in/out reporting.
    pub focus_events: bool,
}

impl Default for TerminalFeatures {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            raw_mode: true,
            mouse_capture: false,
            bracketed_paste: false,
            focus_events: false,
        }
    }
}

/// Owns the controlling terminal for the lifetime of the application: saves
/// and restores `termios` state, toggles DEC private modes, and provides the
/// write end for the renderer.
///
/// Setup is paired with guaranteed cleanup via `Drop`, so a panic mid-frame
/// still restores cooked mode and exits the alternate screen.
pub struct TerminalDriver<W: Write> {
    writer: W,
    fd: RawFd,
    orig_termios: Option<libc::termios>,
    features: TerminalFeatures,
}

impl TerminalDriver<io::Stdout> {
    /// A driver writing to stdout, reading termios from stdin's fd.
    pub fn stdout(features: TerminalFeatures) -> Result<Self> {
        Self::new(io::stdout(), libc::STDIN_FILENO, features)
    }
}

impl<W: Write> TerminalDriver<W> {
    /// Take ownership of `writer`, entering the requested `features`.
    /// `tty_fd` is the file descriptor whose `termios` is saved/restored
    /// (normally stdin).
    pub fn new(mut writer: W, tty_fd: RawFd, features: TerminalFeatures) -> Result<Self> {
        install_resize_handler().map_err(|e| Error::Terminal(e.to_string()))?;

        let orig_termios = if features.raw_mode {
            let orig = Self::get_termios(tty_fd)?;
            let mut raw = orig;
            Self::apply_raw_flags(&mut raw);
            Self::set_termios(tty_fd, &raw)?;
            Some(orig)
        } else {
            None
        };

        if features.alternate_screen {
            write!(writer, "{}", wire::ALT_SCREEN_ENTER)?;
        }
        if features.mouse_capture {
            write!(writer, "{}", wire::MOUSE_ON)?;
        }
        if features.bracketed_paste {
            write!(writer, "{}", wire::BRACKETED_PASTE_ON)?;
        }
        if features.focus_events {
            write!(writer, "{}", wire::FOCUS_EVENTS_ON)?;
        }
        write!(writer, "{}", wire::CURSOR_HIDE)?;
        writer.flush()?;

        Ok(Self {
            writer,
            fd: tty_fd,
            orig_termios,
            features,
        })
    }

    fn apply_raw_flags(tios: &mut libc::termios) {
        unsafe {
            libc::cfmakeraw(tios);
        }
        tios.c_cc[libc::VMIN] = 0;
        tios.c_cc[libc::VTIME] = 0;
    }

    fn get_termios(fd: RawFd) -> Result<libc::termios> {
        unsafe {
            let mut tios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut tios) != 0 {
                return Err(Error::Terminal(io::Error::last_os_error().to_string()));
            }
            Ok(tios)
        }
    }

    fn set_termios(fd: RawFd, tios: &libc::termios) -> Result<()> {
        unsafe {
            if libc::tcsetattr(fd, libc::TCSAFLUSH, tios) != 0 {
                return Err(Error::Terminal(io::Error::last_os_error().to_string()));
            }
        }
        Ok(())
    }

    /// The writer this driver renders to.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Current terminal size.
    pub fn size(&self) -> io::Result<Size> {
        terminal_size(self.fd)
    }

    /// Suspend: restore cooked mode and leave the alternate screen, without
    /// dropping the driver (e.g. for `SIGTSTP`/shell job control).
    pub fn suspend(&mut self) -> Result<()> {
        if let Some(orig) = self.orig_termios {
            Self::set_termios(self.fd, &orig)?;
        }
        if self.features.alternate_screen {
            write!(self.writer, "{}", wire::ALT_SCREEN_EXIT)?;
        }
        write!(self.writer, "{}", wire::CURSOR_SHOW)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Resume after `suspend`: re-enter raw mode and the alternate screen.
    pub fn resume(&mut self) -> Result<()> {
        if self.features.raw_mode {
            let mut raw = Self::get_termios(self.fd)?;
            Self::apply_raw_flags(&mut raw);
            Self::set_termios(self.fd, &raw)?;
        }
        if self.features.alternate_screen {
            write!(self.writer, "{}", wire::ALT_SCREEN_ENTER)?;
        }
        write!(self.writer, "{}", wire::CURSOR_HIDE)?;
        self.writer.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        write!(self.writer, "{}", wire::SGR_RESET)?;
        write!(self.writer, "{}", wire::CURSOR_SHOW)?;
        if self.features.focus_events {
            write!(self.writer, "{}", wire::FOCUS_EVENTS_OFF)?;
        }
        if self.features.bracketed_paste {
            write!(self.writer, "{}", wire::BRACKETED_PASTE_OFF)?;
        }
        if self.features.mouse_capture {
            write!(self.writer, "{}", wire::MOUSE_OFF)?;
        }
        if self.features.alternate_screen {
            write!(self.writer, "{}", wire::ALT_SCREEN_EXIT)?;
        }
        self.writer.flush()?;
        if let Some(orig) = self.orig_termios {
            Self::set_termios(self.fd, &orig)?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalDriver<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_features_enable_alt_screen_and_raw_mode_only() {
        let f = TerminalFeatures::default();
        assert!(f.alternate_screen);
        assert!(f.raw_mode);
        assert!(!f.mouse_capture);
        assert!(!f.bracketed_paste);
        assert!(!f.focus_events);
    }

    #[test]
    #[serial_test::serial]
    fn resize_flag_round_trips() {
        // Not asserting real SIGWINCH delivery (signal-safety means we can't
        // drive it from a unit test), just the take-and-clear semantics.
        // `RESIZE_PENDING` is process-global, so this runs serialized against
        // other tests touching it (tick.rs's resize-observation tests).
        RESIZE_PENDING.store(true, Ordering::Relaxed);
        assert!(take_resize_pending());
        assert!(!take_resize_pending());
    }
}
