use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
};

use crate::{App, event::TuiEvent, event_loop::EventLoop};

/// Makes the terminal tag key events as press, repeat or release, so a held
/// key arrives as one press followed by repeats.
const KEY_EVENT_FLAGS: KeyboardEnhancementFlags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;

/// Keeps [`KEY_EVENT_FLAGS`] pushed while alive, on terminals that support it.
#[derive(Debug)]
struct KeyEventTypes {
    pushed: bool,
}

impl KeyEventTypes {
    fn enable<W: io::Write>(out: &mut W, supported: bool) -> Self {
        let pushed =
            supported && execute!(out, PushKeyboardEnhancementFlags(KEY_EVENT_FLAGS)).is_ok();
        Self { pushed }
    }

    fn disable<W: io::Write>(self, out: &mut W) {
        if self.pushed {
            _ = execute!(out, PopKeyboardEnhancementFlags);
        }
    }
}

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    /// Creates a new Runtime running at 60 frames per second.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame rate (FPS).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.set_frame_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Sets the frame interval.
    pub fn set_frame_interval(&mut self, interval: Duration) {
        self.events.set_frame_interval(interval);
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.events.frame_interval()
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs frames until `app.should_exit()` returns true
    ///    - `Event::Update`: calls `app.update()` with the elapsed time
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    ///    - `Event::Render`: calls `app.draw()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let supported = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
            let key_event_types = KeyEventTypes::enable(&mut io::stdout(), supported);
            let result = self.run_frames(app, terminal);
            key_event_types.disable(&mut io::stdout());
            result
        })
    }

    fn run_frames<A>(
        &mut self,
        app: &mut A,
        terminal: &mut ratatui::DefaultTerminal,
    ) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Update(elapsed) => {
                    app.update(self, elapsed);
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
            }
        }
        Ok(())
    }
}
