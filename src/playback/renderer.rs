//! The `Renderer` seam — everything the engine tells the display.
//!
//! The engine only ever writes to a renderer; it never reads state back.

use crate::playback::state::ButtonState;
use crate::session::ConnectionMode;

/// Output side of the playback engine.
///
/// Implementors draw the word with its ORP character pinned to a fixed
/// position, and mirror progress and control state.
pub trait Renderer {
    /// Show one word split around its ORP character.
    fn display(&mut self, before: &str, orp: char, after: &str, is_heading: bool);

    /// Blank the word area.
    fn clear(&mut self);

    /// `current` words of `total` have been shown.
    fn update_progress(&mut self, current: usize, total: usize);

    fn update_buttons(&mut self, buttons: ButtonState);

    /// Result of a health probe, for a connection indicator.
    fn update_status(&mut self, _connected: bool) {}

    /// Which path prepared the session that was just loaded.
    fn update_source(&mut self, _mode: ConnectionMode) {}
}

// ---------------------------------------------------------------------------
// RecordingRenderer  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) use recording::{RecordingRenderer, RenderEvent};
