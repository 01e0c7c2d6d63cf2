//! Non-blocking byte availability checks on a file descriptor via `poll(2)`.

use std::os::unix::io::RawFd;
use std::time::Duration;

/// Polls a raw file descriptor (normally stdin) for readability within a
/// caller-supplied timeout, and reads single bytes off it without blocking
/// once data is known to be available.
pub struct EventReader {
    fd: RawFd,
}

impl EventReader {
    /// Wrap a file descriptor for non-blocking reads.
    pub fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// A reader over stdin.
    pub fn stdin() -> Self {
        Self::new(libc::STDIN_FILENO)
    }

    /// True if at least one byte is available to read within `timeout`.
    pub fn has_input(&self, timeout: Duration) -> bool {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        let rc = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        rc > 0 && (pfd.revents & libc::POLLIN) != 0
    }

    /// Read a single byte if one is immediately available (assumes
    /// `has_input` was just checked), or `None` if there is nothing to read
    /// or the read failed. Does not take ownership of the fd.
    pub fn read_byte(&self) -> Option<u8> {
        let mut buf = [0u8; 1];
        let n = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut libc::c_void, 1) };
        if n == 1 {
            Some(buf[0])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_input_true_when_pipe_has_data() {
        let mut fds = [0; 2];
        unsafe {
            assert_eq!(libc::pipe(fds.as_mut_ptr()), 0);
        }
        let (read_fd, write_fd) = (fds[0], fds[1]);
        unsafe {
            libc::write(write_fd, b"x".as_ptr() as *const libc::c_void, 1);
        }
        let reader = EventReader::new(read_fd);
        assert!(reader.has_input(Duration::from_millis(50)));
        assert_eq!(reader.read_byte(), Some(b'x'));
        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }

    #[test]
    fn has_input_false_on_empty_pipe_times_out() {
        let mut fds = [0; 2];
        unsafe {
            assert_eq!(libc::pipe(fds.as_mut_ptr()), 0);
        }
        let (read_fd, write_fd) = (fds[0], fds[1]);
        let reader = EventReader::new(read_fd);
        assert!(!reader.has_input(Duration::from_millis(10)));
        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }
}
