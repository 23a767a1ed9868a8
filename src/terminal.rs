//! ANSI terminal implementation of [`Renderer`].
//!
//! Everything is drawn on a single line that is rewritten in place:
//!
//! ```text
//! <padding><before><ORP><after>    12/40  local  [pause]
//! ```
//!
//! The padding keeps the ORP character on `orp_column` for every word.

use std::io::{self, Write};

use crate::config::DisplayConfig;
use crate::playback::{ButtonState, Renderer};
use crate::session::ConnectionMode;

const ORP_COLOR: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Width of the word area before the status suffix starts.
const WORD_AREA: usize = 24;

#[derive(Debug, Clone)]
struct Shown {
    before: String,
    orp: char,
    after: String,
    is_heading: bool,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    orp_column: usize,
    color: bool,
    word: Option<Shown>,
    progress: (usize, usize),
    source: Option<ConnectionMode>,
    buttons: Option<ButtonState>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new(config: &DisplayConfig) -> Self {
        Self::with_writer(io::stdout(), config)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, config: &DisplayConfig) -> Self {
        Self {
            out,
            orp_column: config.orp_column,
            color: config.color,
            word: None,
            progress: (0, 0),
            source: None,
            buttons: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Finish the current line so later output starts on a fresh one.
    pub fn finish_line(&mut self) {
        if let Err(e) = writeln!(self.out).and_then(|_| self.out.flush()) {
            log::debug!("terminal: write failed: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// The line as it should currently look, without the clear prefix.
    fn render_line(&self) -> String {
        let mut line = String::new();
        let mut width = 0;

        if let Some(word) = &self.word {
            let pad = self
                .orp_column
                .saturating_sub(word.before.chars().count());
            line.push_str(&" ".repeat(pad));

            if self.color && word.is_heading {
                line.push_str(BOLD);
            }
            line.push_str(&word.before);
            if self.color {
                line.push_str(ORP_COLOR);
                line.push(word.orp);
                line.push_str(RESET);
                if word.is_heading {
                    line.push_str(BOLD);
                }
            } else {
                line.push(word.orp);
            }
            line.push_str(&word.after);
            if self.color && word.is_heading {
                line.push_str(RESET);
            }

            width = pad
                + word.before.chars().count()
                + 1
                + word.after.chars().count();
        }

        let (current, total) = self.progress;
        if total == 0 {
            return line;
        }

        let gap = (self.orp_column + WORD_AREA).saturating_sub(width).max(2);
        line.push_str(&" ".repeat(gap));

        let mut suffix = format!("{current}/{total}");
        if let Some(source) = self.source {
            suffix.push_str("  ");
            suffix.push_str(source.label());
        }
        if let Some(hint) = self.buttons.and_then(button_hint) {
            suffix.push_str("  [");
            suffix.push_str(hint);
            suffix.push(']');
        }

        if self.color {
            line.push_str(DIM);
            line.push_str(&suffix);
            line.push_str(RESET);
        } else {
            line.push_str(&suffix);
        }
        line
    }

    fn redraw(&mut self) {
        let line = self.render_line();
        let result = write!(self.out, "{CLEAR_LINE}{line}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::debug!("terminal: write failed: {e}");
        }
    }
}

fn button_hint(buttons: ButtonState) -> Option<&'static str> {
    if buttons.pause {
        Some("pause")
    } else if buttons.play {
        Some("play")
    } else if buttons.restart {
        Some("restart")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Renderer impl
// ---------------------------------------------------------------------------

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn display(&mut self, before: &str, orp: char, after: &str, is_heading: bool) {
        self.word = Some(Shown {
            before: before.to_owned(),
            orp,
            after: after.to_owned(),
            is_heading,
        });
        self.redraw();
    }

    fn clear(&mut self) {
        self.word = None;
        self.redraw();
    }

    fn update_progress(&mut self, current: usize, total: usize) {
        self.progress = (current, total);
        self.redraw();
    }

    fn update_buttons(&mut self, buttons: ButtonState) {
        self.buttons = Some(buttons);
        self.redraw();
    }

    fn update_status(&mut self, connected: bool) {
        if connected {
            log::info!("terminal: enrichment service reachable");
        } else {
            log::info!("terminal: enrichment service unreachable, reading locally");
        }
    }

    fn update_source(&mut self, mode: ConnectionMode) {
        self.source = Some(mode);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(orp_column: usize) -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::with_writer(
            Vec::new(),
            &DisplayConfig {
                orp_column,
                color: false,
            },
        )
    }

    #[test]
    fn orp_lands_on_configured_column() {
        let mut r = plain(10);

        r.display("re", 'a', "ding", false);
        assert_eq!(r.render_line().chars().position(|c| c == 'a'), Some(10));

        r.display("", 'i', "s", false);
        assert_eq!(r.render_line().chars().position(|c| c == 'i'), Some(10));
    }

    #[test]
    fn long_prefix_is_not_padded() {
        let mut r = plain(1);
        r.display("uni", 'v', "erse", false);
        assert_eq!(r.render_line(), "universe");
    }

    #[test]
    fn progress_source_and_hint_follow_the_word() {
        let mut r = plain(4);
        r.update_source(ConnectionMode::Local);
        r.update_buttons(ButtonState::for_state(
            crate::playback::PlaybackState::Playing,
            1,
            4,
        ));
        r.display("", 'S', "peed", false);
        r.update_progress(1, 4);

        let line = r.render_line();
        assert!(line.starts_with("    Speed"));
        assert!(line.trim_end().ends_with("1/4  local  [pause]"));
    }

    #[test]
    fn clear_removes_the_word() {
        let mut r = plain(4);
        r.display("", 'S', "peed", false);
        r.clear();
        assert_eq!(r.render_line(), "");
    }

    #[test]
    fn color_wraps_orp_and_heading() {
        let mut r = TerminalRenderer::with_writer(Vec::new(), &DisplayConfig::default());
        r.display("Ti", 't', "le", true);

        let line = r.render_line();
        assert!(line.contains(&format!("{ORP_COLOR}t{RESET}")));
        assert!(line.contains(BOLD));
    }

    #[test]
    fn every_redraw_clears_the_line() {
        let mut r = plain(2);
        r.display("", 'a', "", false);
        r.display("", 'b', "", false);

        let written = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(written.matches(CLEAR_LINE).count(), 2);
        assert!(written.ends_with("  b"));
    }
}
