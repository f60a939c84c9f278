//! Frame-paced terminal runtime built on ratatui and crossterm.
//!
//! Every frame runs the same sequence: measure the time since the previous
//! frame and pass it to [`App::update`], hand every pending terminal event to
//! [`App::handle_event`] without blocking, draw, then sleep until the next
//! frame is due.

pub use self::{app::App, event_loop::FrameClock, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
