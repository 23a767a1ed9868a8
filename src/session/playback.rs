//! [`PlaybackSession`] — a loaded text plus its reading position.

use std::time::Duration;

use super::{ConnectionMode, Slot, Word};

/// Default reading speed when nothing else is configured.
pub const DEFAULT_WPM: u32 = 300;

/// Shortest tick the engine will ask a scheduler for.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Interval between two ticks at `wpm` words per minute:
/// `floor(60000 / wpm)` milliseconds.
///
/// A zero speed is treated as 1 wpm rather than dividing by zero, and
/// speeds above 60000 wpm are held at a 1 ms tick.
///
/// ```
/// use std::time::Duration;
/// use speed_reader::session::tick_delay;
///
/// assert_eq!(tick_delay(300), Duration::from_millis(200));
/// assert_eq!(tick_delay(600), Duration::from_millis(100));
/// ```
pub fn tick_delay(wpm: u32) -> Duration {
    Duration::from_millis(60_000 / u64::from(wpm.max(1))).max(MIN_TICK)
}

/// The in-memory record of a prepared text.
///
/// Created by the fallback coordinator and replaced wholesale on every
/// successful `prepare`.  Only `current_index` and `speed_wpm` change in
/// place, and only the playback controller changes them.
///
/// Each [`Slot`] costs one tick, so pauses from the enrichment service
/// count towards progress and reading time like words do.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    slots: Vec<Slot>,
    /// Next slot to emit; `slots.len()` once finished.
    pub(crate) current_index: usize,
    pub(crate) speed_wpm: u32,
    connection_mode: ConnectionMode,
}

impl PlaybackSession {
    /// A session of words only, as produced by local segmentation.
    pub fn new(words: Vec<Word>, connection_mode: ConnectionMode) -> Self {
        Self::from_slots(words.into_iter().map(Slot::Word).collect(), connection_mode)
    }

    pub fn from_slots(slots: Vec<Slot>, connection_mode: ConnectionMode) -> Self {
        Self {
            slots,
            current_index: 0,
            speed_wpm: DEFAULT_WPM,
            connection_mode,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The words in order, skipping pauses.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.slots.iter().filter_map(Slot::word)
    }

    /// Number of slots, pauses included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// `false` when there is nothing to read, even if pauses are present.
    pub fn has_words(&self) -> bool {
        self.words().next().is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn speed_wpm(&self) -> u32 {
        self.speed_wpm
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.connection_mode
    }

    /// `true` once every slot has been emitted.
    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.slots.len()
    }

    /// Word texts in order, mostly handy for logging and tests.
    pub fn texts(&self) -> Vec<&str> {
        self.words().map(Word::text).collect()
    }

    /// Time needed to play the whole session at its current speed.
    pub fn estimated_reading_time(&self) -> Duration {
        if self.slots.is_empty() || self.speed_wpm == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.slots.len() as f64 / f64::from(self.speed_wpm) * 60.0)
    }
}
