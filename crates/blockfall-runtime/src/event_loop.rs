use std::{
    io, thread,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Frame pacing state.
///
/// Tracks when the previous frame started and how long a frame lasts. The
/// clock does not read the system time itself; callers pass `now` in.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_interval: Duration,
    last_frame: Instant,
}

impl FrameClock {
    /// Creates a clock whose first frame starts at `now`.
    #[must_use]
    pub fn new(frame_interval: Duration, now: Instant) -> Self {
        Self {
            frame_interval,
            last_frame: now,
        }
    }

    /// Creates a clock from a frame rate (FPS).
    #[must_use]
    pub fn from_rate(rate: f64, now: Instant) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / rate), now)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// Starts a new frame at `now` and returns the time since the previous one.
    pub fn start_frame(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Returns how long to sleep before the next frame is due.
    ///
    /// Zero when the current frame has already overrun its interval.
    #[must_use]
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        (self.last_frame + self.frame_interval).saturating_duration_since(now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Update,
    Input,
    Render,
    Wait,
}

/// Event loop state management.
///
/// Produces one `Update`, then every pending crossterm event, then one
/// `Render` per frame, and sleeps between frames. Input is never waited
/// for; it is drained once per frame.
#[derive(Debug)]
pub(super) struct EventLoop {
    clock: FrameClock,
    phase: Phase,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::from_rate(DEFAULT_FRAME_RATE, Instant::now()),
            phase: Phase::Update,
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.clock.set_frame_interval(interval);
    }

    pub(super) fn frame_interval(&self) -> Duration {
        self.clock.frame_interval()
    }

    /// Returns the next event, sleeping until the next frame when needed.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            match self.phase {
                Phase::Wait => {
                    thread::sleep(self.clock.time_until_next_frame(Instant::now()));
                    self.phase = Phase::Update;
                }
                Phase::Update => {
                    self.phase = Phase::Input;
                    let elapsed = self.clock.start_frame(Instant::now());
                    return Ok(TuiEvent::Update(elapsed));
                }
                Phase::Input => {
                    if event::poll(Duration::ZERO)? {
                        return Ok(event::read()?.into());
                    }
                    self.phase = Phase::Render;
                }
                Phase::Render => {
                    self.phase = Phase::Wait;
                    return Ok(TuiEvent::Render);
                }
            }
        }
    }
}
