//! Optimal recognition point (ORP) lookup.
//!
//! The ORP is the character the reader's gaze should rest on.  Its position
//! depends only on the word's length (counted in `char`s):
//!
//! | Length | ORP index (0-based) |
//! |--------|---------------------|
//! | 1–2    | 0                   |
//! | 3–5    | 1                   |
//! | 6–9    | 2                   |
//! | 10–13  | 3                   |
//! | 14+    | 4                   |
//!
//! Every locally-prepared word goes through this table.

use thiserror::Error;

// ---------------------------------------------------------------------------
// OrpError
// ---------------------------------------------------------------------------

/// Errors from the ORP calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrpError {
    /// An empty string has no character to fixate on.
    #[error("cannot compute ORP for an empty word")]
    EmptyWord,
}

// ---------------------------------------------------------------------------
// compute_orp_index
// ---------------------------------------------------------------------------

/// Return the 0-based `char` index of the ORP for `word`.
///
/// ```
/// use speed_reader::text::compute_orp_index;
///
/// assert_eq!(compute_orp_index("is").unwrap(), 0);
/// assert_eq!(compute_orp_index("hello").unwrap(), 1);
/// assert_eq!(compute_orp_index("reading").unwrap(), 2);
/// assert!(compute_orp_index("").is_err());
/// ```
pub fn compute_orp_index(word: &str) -> Result<usize, OrpError> {
    let index = match word.chars().count() {
        0 => return Err(OrpError::EmptyWord),
        1..=2 => 0,
        3..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    };
    Ok(index)
}

// ---------------------------------------------------------------------------
// split_at_orp
// ---------------------------------------------------------------------------

/// Split `word` into `(before, orp, after)` around the character at
/// `orp_index`.
///
/// Returns `None` when `orp_index` is not a valid `char` index into `word`.
pub fn split_at_char(word: &str, orp_index: usize) -> Option<(&str, char, &str)> {
    let (start, orp) = word.char_indices().nth(orp_index)?;
    let end = start + orp.len_utf8();
    Some((&word[..start], orp, &word[end..]))
}

/// Split `word` around its table-derived ORP.
///
/// ```
/// use speed_reader::text::split_at_orp;
///
/// assert_eq!(split_at_orp("reading").unwrap(), ("re", 'a', "ding"));
/// ```
pub fn split_at_orp(word: &str) -> Result<(&str, char, &str), OrpError> {
    let index = compute_orp_index(word)?;
    split_at_char(word, index).ok_or(OrpError::EmptyWord)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn word_of_len(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn length_bands_match_table() {
        let expected = [
            (1, 0),
            (2, 0),
            (3, 1),
            (4, 1),
            (5, 1),
            (6, 2),
            (9, 2),
            (10, 3),
            (13, 3),
            (14, 4),
            (20, 4),
            (64, 4),
        ];
        for (len, idx) in expected {
            assert_eq!(
                compute_orp_index(&word_of_len(len)).unwrap(),
                idx,
                "length {len}"
            );
        }
    }

    #[test]
    fn index_is_always_inside_the_word() {
        for len in 1..=40 {
            let idx = compute_orp_index(&word_of_len(len)).unwrap();
            assert!(idx < len, "length {len} gave index {idx}");
        }
    }

    #[test]
    fn empty_word_is_rejected() {
        assert_eq!(compute_orp_index(""), Err(OrpError::EmptyWord));
        assert_eq!(split_at_orp(""), Err(OrpError::EmptyWord));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // 5 chars, 10 bytes.
        assert_eq!(compute_orp_index("ééééé").unwrap(), 1);
        assert_eq!(split_at_orp("naïve").unwrap(), ("n", 'a', "ïve"));
        assert_eq!(split_at_orp("über").unwrap(), ("ü", 'b', "er"));
    }

    #[test]
    fn split_single_char() {
        assert_eq!(split_at_orp("I").unwrap(), ("", 'I', ""));
    }

    #[test]
    fn split_at_char_out_of_range_is_none() {
        assert_eq!(split_at_char("abc", 3), None);
        assert_eq!(split_at_char("abc", 2), Some(("ab", 'c', "")));
    }
}
