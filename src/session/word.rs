//! The engine's word model.

use thiserror::Error;

use crate::text::{compute_orp_index, split_at_char, OrpError};

// ---------------------------------------------------------------------------
// WordError
// ---------------------------------------------------------------------------

/// Reasons a [`Word`] cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error(transparent)]
    Orp(#[from] OrpError),

    #[error("word {0:?} contains whitespace")]
    ContainsWhitespace(String),

    #[error("ORP index {index} is outside word {text:?} ({len} chars)")]
    OrpOutOfRange {
        text: String,
        index: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// A single displayable word.
///
/// Invariants, enforced by the constructors:
/// * `text` is non-empty and contains no whitespace;
/// * `orp_index` is a valid `char` index into `text`.
///
/// Fields are private so a `Word` is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    orp_index: usize,
    is_heading: bool,
}

impl Word {
    /// Build a word whose ORP comes from the local lookup table.
    pub fn new(text: impl Into<String>, is_heading: bool) -> Result<Self, WordError> {
        let text = text.into();
        check_text(&text)?;
        let orp_index = compute_orp_index(&text)?;
        Ok(Self {
            text,
            orp_index,
            is_heading,
        })
    }

    /// Build a word with an externally supplied ORP index.
    pub fn with_orp(
        text: impl Into<String>,
        orp_index: usize,
        is_heading: bool,
    ) -> Result<Self, WordError> {
        let text = text.into();
        check_text(&text)?;
        let len = text.chars().count();
        if orp_index >= len {
            return Err(WordError::OrpOutOfRange {
                text,
                index: orp_index,
                len,
            });
        }
        Ok(Self {
            text,
            orp_index,
            is_heading,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn orp_index(&self) -> usize {
        self.orp_index
    }

    pub fn is_heading(&self) -> bool {
        self.is_heading
    }

    /// `(before, orp, after)`: the three pieces handed to the renderer.
    ///
    /// ```
    /// use speed_reader::session::Word;
    ///
    /// let word = Word::new("reading", false).unwrap();
    /// assert_eq!(word.split(), ("re", 'a', "ding"));
    /// ```
    pub fn split(&self) -> (&str, char, &str) {
        // Constructors guarantee the index is in range.
        split_at_char(&self.text, self.orp_index).unwrap_or(("", ' ', ""))
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One tick of playback: a word to show, or a blank beat.
///
/// Pauses come from the enrichment service (after sentence endings and
/// around headings); local segmentation never produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Word(Word),
    Pause,
}

impl Slot {
    pub fn word(&self) -> Option<&Word> {
        match self {
            Slot::Word(word) => Some(word),
            Slot::Pause => None,
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Slot::Pause)
    }
}

impl From<Word> for Slot {
    fn from(word: Word) -> Self {
        Slot::Word(word)
    }
}

fn check_text(text: &str) -> Result<(), WordError> {
    if text.is_empty() {
        return Err(OrpError::EmptyWord.into());
    }
    if text.chars().any(char::is_whitespace) {
        return Err(WordError::ContainsWhitespace(text.to_owned()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
