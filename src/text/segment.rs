//! Local whitespace segmenter — the offline fallback for text preparation.

/// Split `text` into plain words.
///
/// Leading/trailing whitespace is ignored and any run of Unicode whitespace
/// separates two words.  Never fails; empty or blank input yields an empty
/// vector.
///
/// ```
/// use speed_reader::text::segment;
///
/// assert_eq!(segment("  a  b \n c "), vec!["a", "b", "c"]);
/// assert!(segment("").is_empty());
/// ```
pub fn segment(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(segment("  a  b \n c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn whitespace_only_input() {
        assert!(segment(" \t\r\n  ").is_empty());
    }

    #[test]
    fn keeps_punctuation_attached() {
        assert_eq!(
            segment("Introduction:\nSpeed reading, briefly."),
            vec!["Introduction:", "Speed", "reading,", "briefly."]
        );
    }

    #[test]
    fn unicode_whitespace_separates() {
        // U+3000 ideographic space and U+00A0 no-break space.
        assert_eq!(segment("one\u{3000}two\u{a0}three"), vec!["one", "two", "three"]);
    }
}
