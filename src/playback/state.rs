//! Playback state machine states and the button layout derived from them.

// ---------------------------------------------------------------------------
// PlaybackState
// ---------------------------------------------------------------------------

/// States of the playback controller.
///
/// ```text
/// Idle ──load──▶ Ready ──play──▶ Playing ──pause──▶ Paused ──play──▶ Playing
///                                   │
///                                   └─last word──▶ Finished ──play──▶ Playing
/// any state ──load──▶ Ready
/// any state ──restart──▶ Ready ──(grace delay)──▶ Playing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No session loaded.
    #[default]
    Idle,
    /// Session loaded, positioned at the first word, not playing.
    Ready,
    /// A repeating tick timer is emitting words.
    Playing,
    /// Stopped mid-session; `play` resumes from the same word.
    Paused,
    /// Every word has been emitted.
    Finished,
}

impl PlaybackState {
    /// A short human-readable label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Ready => "Ready",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Finished => "Finished",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

// ---------------------------------------------------------------------------
// ButtonState
// ---------------------------------------------------------------------------

/// Which transport controls the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub play: bool,
    pub pause: bool,
    pub restart: bool,
}

impl ButtonState {
    /// Derive the controls from the controller's state and position.
    ///
    /// ```
    /// use speed_reader::playback::{ButtonState, PlaybackState};
    ///
    /// let b = ButtonState::for_state(PlaybackState::Playing, 3, 10);
    /// assert!(b.pause && !b.play && !b.restart);
    /// ```
    pub fn for_state(state: PlaybackState, current_index: usize, total: usize) -> Self {
        match state {
            PlaybackState::Playing => Self {
                play: false,
                pause: true,
                restart: false,
            },
            PlaybackState::Finished if total > 0 => Self {
                play: false,
                pause: false,
                restart: true,
            },
            _ => Self {
                play: true,
                pause: false,
                restart: current_index > 0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
