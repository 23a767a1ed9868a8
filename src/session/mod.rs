//! Data model shared by the preparation pipeline and the playback controller.
//!
//! * [`Word`] — an immutable word with its ORP index and heading flag.
//! * [`Slot`] — one tick of playback, either a [`Word`] or a blank pause.
//! * [`PlaybackSession`] — the prepared slot sequence plus reading position.
//! * [`ConnectionMode`] / [`ConnectionStatus`] — where words came from and
//!   whether the enrichment service was last seen alive.

pub mod playback;
pub mod status;
pub mod word;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use playback::{tick_delay, PlaybackSession, DEFAULT_WPM};
pub use status::{ConnectionMode, ConnectionStatus};
pub use word::{Slot, Word, WordError};
