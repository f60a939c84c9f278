use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications, in per-frame order.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Start of a frame, carrying the time since the previous one.
    Update(Duration),
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
    /// End of a frame's input, time to draw.
    Render,
}
