//! The FPS governor and the single-threaded tick loop that drives input,
//! render, and resize handling each frame.

use crate::core::constants::{DEFAULT_TARGET_FPS, MAX_EVENTS_PER_TICK, MIN_POLL_TIMEOUT_MS};
use crate::runtime::render::terminal::take_resize_pending;
use std::time::{Duration, Instant};

/// Tracks target frame rate and gates rendering to that cadence.
pub struct FpsGovernor {
    target_fps: u32,
    frame_duration: Duration,
    last_frame_time: Instant,
}

impl FpsGovernor {
    /// A governor targeting `target_fps` frames per second, starting the
    /// clock now.
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            target_fps,
            frame_duration: Duration::from_millis(1000 / target_fps as u64),
            last_frame_time: Instant::now(),
        }
    }

    /// A governor at the default target FPS.
    pub fn default_rate() -> Self {
        Self::new(DEFAULT_TARGET_FPS)
    }

    /// Configured target frames per second.
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time remaining until the next frame is due, zero if overdue.
    pub fn remaining_frame_time(&self) -> Duration {
        let elapsed = self.last_frame_time.elapsed();
        self.frame_duration.saturating_sub(elapsed)
    }

    /// True iff a frame is due (`remaining_frame_time() == Duration::ZERO`).
    pub fn should_render(&self) -> bool {
        self.remaining_frame_time() == Duration::ZERO
    }

    /// The `poll` timeout to use this iteration: at least 1ms, so a
    /// zero-duration timeout never spins the CPU.
    pub fn poll_timeout(&self) -> Duration {
        self.remaining_frame_time()
            .max(Duration::from_millis(MIN_POLL_TIMEOUT_MS))
    }

    /// Mark the start of a new measurement window. Call once a frame has
    /// been rendered (or the governor determined none was due).
    pub fn start_frame(&mut self) {
        self.last_frame_time = Instant::now();
    }
}

/// What a user event/render handler returned after being offered an event
/// or a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Keep running the tick loop.
    Continue,
    /// Exit the tick loop after this tick completes.
    Stop,
}

/// Drives the single-threaded blocking scheduling model (§5): `poll` blocks
/// the calling thread for up to the governor's timeout each tick.
///
/// Generic over the event source and render/resize callbacks so it can be
/// driven by a real [`super::event::EventReader`] in production or an
/// in-memory byte queue in tests.
pub struct TickLoop {
    governor: FpsGovernor,
    frame_count: u64,
    shutdown: bool,
}

impl TickLoop {
    /// A tick loop at the given target FPS. Drains any resize notification
    /// already pending from before construction, so a SIGWINCH delivered
    /// earlier doesn't spuriously fire on the first tick.
    pub fn new(target_fps: u32) -> Self {
        take_resize_pending();
        Self {
            governor: FpsGovernor::new(target_fps),
            frame_count: 0,
            shutdown: false,
        }
    }

    /// Request shutdown: observed at the top of the next tick. The current
    /// tick (if any is in progress) still completes and commits its render.
    pub fn quit(&mut self) {
        self.shutdown = true;
    }

    /// True once `quit()` has been called.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Poll timeout to use for this tick's input wait.
    pub fn poll_timeout(&self) -> Duration {
        self.governor.poll_timeout()
    }

    /// Step 1 of the tick procedure: true iff a `SIGWINCH` has arrived
    /// since the last call. Clears the pending flag, so a resize is
    /// observed exactly once.
    pub fn take_resize(&mut self) -> bool {
        take_resize_pending()
    }

    /// Step 4's render gate: true iff a frame is due this iteration.
    pub fn should_render(&self) -> bool {
        self.governor.should_render()
    }

    /// Commit a render: increments the frame counter and resets the
    /// governor's measurement window.
    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        self.governor.start_frame();
    }

    /// The maximum number of events to drain from the input stream before
    /// re-checking the render gate, per tick.
    pub fn max_events_per_tick(&self) -> usize {
        MAX_EVENTS_PER_TICK
    }
}

/// Cooperative analogue of [`TickLoop`] for the `async` feature (§5): the
/// same frame-pacing and resize bookkeeping, but the input wait yields to
/// the host executor instead of blocking the calling thread.
#[cfg(feature = "async")]
pub struct CooperativeTickLoop {
    governor: FpsGovernor,
    frame_count: u64,
    shutdown: bool,
}

#[cfg(feature = "async")]
impl CooperativeTickLoop {
    /// A cooperative tick loop at the given target FPS. As with
    /// [`TickLoop::new`], drains any resize notification already pending.
    pub fn new(target_fps: u32) -> Self {
        take_resize_pending();
        Self {
            governor: FpsGovernor::new(target_fps),
            frame_count: 0,
            shutdown: false,
        }
    }

    /// Request shutdown, observed at the top of the next tick.
    pub fn quit(&mut self) {
        self.shutdown = true;
    }

    /// True once `quit()` has been called.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// True iff a `SIGWINCH` has arrived since the last call.
    pub fn take_resize(&mut self) -> bool {
        take_resize_pending()
    }

    /// True iff a frame is due this iteration.
    pub fn should_render(&self) -> bool {
        self.governor.should_render()
    }

    /// Commit a render: increments the frame counter and resets the
    /// governor's measurement window.
    pub fn end_frame(&mut self) {
        self.frame_count += 1;
        self.governor.start_frame();
    }

    /// The maximum number of events to drain from the input stream before
    /// re-checking the render gate, per tick.
    pub fn max_events_per_tick(&self) -> usize {
        MAX_EVENTS_PER_TICK
    }

    /// Wait up to this tick's poll timeout for input to arrive on `reader`,
    /// without blocking the async worker thread it runs on.
    ///
    /// `poll(2)` has no portable async-readiness equivalent on a raw fd
    /// without pulling in tokio's `net` feature for `AsyncFd`, so this
    /// offloads the blocking wait to tokio's blocking pool via
    /// `spawn_blocking` and awaits the result. The executor keeps running
    /// other tasks on its worker threads while this tick waits.
    pub async fn wait_for_input(&self, reader: std::sync::Arc<super::event::EventReader>) -> bool {
        let timeout = self.governor.poll_timeout();
        tokio::task::spawn_blocking(move || reader.has_input(timeout))
            .await
            .unwrap_or(false)
    }

    /// Sleep for the remainder of the current frame's budget, for callers
    /// that render on a fixed cadence regardless of input activity.
    pub async fn sleep_until_next_frame(&self) {
        let remaining = self.governor.remaining_frame_time();
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::render::terminal::bump_resize_generation;

    #[test]
    fn governor_should_render_immediately_is_false_then_true_after_duration() {
        let governor = FpsGovernor::new(1000); // 1ms frames
        assert!(!governor.should_render());
        std::thread::sleep(Duration::from_millis(2));
        assert!(governor.should_render());
    }

    #[test]
    fn poll_timeout_never_reports_zero() {
        let governor = FpsGovernor::new(1000);
        std::thread::sleep(Duration::from_millis(5));
        assert!(governor.poll_timeout() >= Duration::from_millis(1));
    }

    #[test]
    fn end_frame_resets_the_measurement_window() {
        let mut governor = FpsGovernor::new(1000);
        std::thread::sleep(Duration::from_millis(2));
        assert!(governor.should_render());
        governor.start_frame();
        assert!(!governor.should_render());
    }

    #[test]
    fn tick_loop_quit_is_observed_via_is_shutting_down() {
        let mut tick = TickLoop::new(60);
        assert!(!tick.is_shutting_down());
        tick.quit();
        assert!(tick.is_shutting_down());
    }

    #[test]
    fn end_frame_increments_frame_count() {
        let mut tick = TickLoop::new(60);
        assert_eq!(tick.frame_count(), 0);
        tick.end_frame();
        assert_eq!(tick.frame_count(), 1);
    }

    #[test]
    #[serial_test::serial]
    fn resize_is_observed_exactly_once_per_bump() {
        // `RESIZE_PENDING` is process-global (shared with the real SIGWINCH
        // handler); serialize against other tests touching it.
        let mut tick = TickLoop::new(60);
        assert!(!tick.take_resize());
        bump_resize_generation();
        assert!(tick.take_resize());
        assert!(!tick.take_resize());
    }

    #[test]
    fn max_events_per_tick_matches_the_configured_bound() {
        let tick = TickLoop::new(60);
        assert_eq!(tick.max_events_per_tick(), MAX_EVENTS_PER_TICK);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn cooperative_tick_loop_quit_is_observed() {
        let mut tick = CooperativeTickLoop::new(60);
        assert!(!tick.is_shutting_down());
        tick.quit();
        assert!(tick.is_shutting_down());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn cooperative_tick_loop_wait_for_input_sees_piped_data() {
        use crate::runtime::event::EventReader;
        use std::sync::Arc;

        let mut fds = [0; 2];
        unsafe {
            assert_eq!(libc::pipe(fds.as_mut_ptr()), 0);
        }
        let (read_fd, write_fd) = (fds[0], fds[1]);
        unsafe {
            libc::write(write_fd, b"x".as_ptr() as *const libc::c_void, 1);
        }

        let tick = CooperativeTickLoop::new(60);
        let reader = Arc::new(EventReader::new(read_fd));
        assert!(tick.wait_for_input(reader).await);

        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn cooperative_tick_loop_end_frame_increments_frame_count() {
        let mut tick = CooperativeTickLoop::new(60);
        assert_eq!(tick.frame_count(), 0);
        tick.end_frame();
        assert_eq!(tick.frame_count(), 1);
    }
}
