//! Playback controller — the word-pacing state machine.
//!
//! [`PlaybackController`] owns the loaded [`PlaybackSession`], the single
//! pending timer, and the [`Renderer`] it reports to.
//!
//! # Timer discipline
//!
//! At most one timer is ever live: either the repeating word tick or the
//! one-shot grace timer armed by `restart`.  Every path that schedules a
//! timer cancels the previous one first, and [`on_timer`] ignores events
//! whose handle is not the live one, so a tick can never land in `Paused`
//! or after `Finished`.
//!
//! [`on_timer`]: PlaybackController::on_timer

use std::time::Duration;

use thiserror::Error;

use crate::config::PlaybackConfig;
use crate::playback::renderer::Renderer;
use crate::playback::scheduler::{Scheduler, TimerEvent, TimerHandle, TimerKind};
use crate::playback::state::{ButtonState, PlaybackState};
use crate::session::{tick_delay, PlaybackSession, Slot};

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// `play` with nothing loaded, or with an empty session.
    #[error("no usable words; load some text first")]
    NoContent,
}

// ---------------------------------------------------------------------------
// PlaybackController
// ---------------------------------------------------------------------------

/// Drives timed emission of a session's words.
pub struct PlaybackController<S: Scheduler, R: Renderer> {
    state: PlaybackState,
    session: Option<PlaybackSession>,
    speed_wpm: u32,
    restart_grace: Duration,
    pending: Option<(TimerHandle, TimerKind)>,
    scheduler: S,
    renderer: R,
}

impl<S: Scheduler, R: Renderer> PlaybackController<S, R> {
    pub fn new(scheduler: S, renderer: R, config: &PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Idle,
            session: None,
            speed_wpm: config.speed_wpm,
            restart_grace: config.restart_grace(),
            pending: None,
            scheduler,
            renderer,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn speed_wpm(&self) -> u32 {
        self.speed_wpm
    }

    /// Index of the next word to emit; 0 with no session.
    pub fn current_index(&self) -> usize {
        self.session.as_ref().map_or(0, PlaybackSession::current_index)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Replace the current session.  Any state → `Ready`.
    pub fn load(&mut self, mut session: PlaybackSession) {
        self.cancel_pending();

        session.current_index = 0;
        session.speed_wpm = self.speed_wpm;
        let total = session.len();
        self.session = Some(session);
        self.state = PlaybackState::Ready;

        self.renderer.clear();
        self.renderer.update_progress(0, total);
        self.report_buttons();
        log::debug!("playback: loaded {total} words → Ready");
    }

    /// `Ready`/`Paused` → `Playing`.
    ///
    /// From `Finished` this is a [`restart`]: the session is rewound to
    /// `Ready` and playing resumes after the grace delay.  When starting at
    /// the first slot, that slot is shown immediately rather than after one
    /// tick.
    ///
    /// [`restart`]: PlaybackController::restart
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.session.as_ref().is_some_and(PlaybackSession::has_words) {
            log::warn!("playback: play requested with nothing loaded");
            return Err(PlaybackError::NoContent);
        }

        match self.state {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Finished => {
                self.restart();
                return Ok(());
            }
            _ => {}
        }

        self.cancel_pending();
        self.state = PlaybackState::Playing;
        self.report_buttons();

        if self.current_index() == 0 {
            self.emit_next();
        }

        // A one-word session finishes on the immediate emission.
        if self.state == PlaybackState::Playing {
            let delay = tick_delay(self.speed_wpm);
            let handle = self.scheduler.schedule_repeating(delay, TimerKind::Tick);
            self.pending = Some((handle, TimerKind::Tick));
            log::debug!(
                "playback: Playing at {} wpm ({} ms/word)",
                self.speed_wpm,
                delay.as_millis()
            );
        }
        Ok(())
    }

    /// `Playing` → `Paused`.  No-op in any other state.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.state = PlaybackState::Paused;
        self.report_buttons();
        log::debug!("playback: Paused at word {}", self.current_index());
    }

    /// Rewind to the first word, then start playing after the grace delay.
    ///
    /// Without a session this does nothing.
    pub fn restart(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.rewind();

        let handle = self
            .scheduler
            .schedule_once(self.restart_grace, TimerKind::RestartGrace);
        self.pending = Some((handle, TimerKind::RestartGrace));
        log::debug!(
            "playback: restart, resuming in {} ms",
            self.restart_grace.as_millis()
        );
    }

    /// Change the reading speed.  While playing, the running tick is
    /// replaced so the new interval applies from the next word on.
    pub fn change_speed(&mut self, wpm: u32) {
        self.speed_wpm = wpm;
        if let Some(session) = self.session.as_mut() {
            session.speed_wpm = wpm;
        }
        log::info!("playback: speed changed to {wpm} wpm");

        if self.state == PlaybackState::Playing {
            self.pause();
            if let Err(e) = self.play() {
                log::warn!("playback: could not resume after speed change: {e}");
            }
        }
    }

    /// Feed a due timer back into the state machine.
    pub fn on_timer(&mut self, event: TimerEvent) {
        if self.pending.map(|(handle, _)| handle) != Some(event.handle) {
            log::trace!("playback: ignoring stale timer {:?}", event.handle);
            return;
        }

        match event.kind {
            TimerKind::Tick => {
                if self.state == PlaybackState::Playing {
                    self.emit_next();
                }
            }
            TimerKind::RestartGrace => {
                self.pending = None;
                if let Err(e) = self.play() {
                    log::warn!("playback: auto-play after restart failed: {e}");
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Show the slot at `current_index` and advance; finish at the end.
    /// A pause blanks the display for its tick.
    fn emit_next(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.slots().get(session.current_index) {
            Some(Slot::Word(word)) => {
                let (before, orp, after) = word.split();
                self.renderer.display(before, orp, after, word.is_heading());
            }
            Some(Slot::Pause) => self.renderer.clear(),
            None => return,
        }

        session.current_index += 1;
        let (current, total) = (session.current_index, session.len());
        self.renderer.update_progress(current, total);

        if current >= total {
            self.cancel_pending();
            self.state = PlaybackState::Finished;
            self.report_buttons();
            log::debug!("playback: Finished after {total} slots");
        }
    }

    /// Cancel any timer, go back to word 0, clear the display → `Ready`.
    fn rewind(&mut self) {
        self.cancel_pending();
        if let Some(session) = self.session.as_mut() {
            session.current_index = 0;
        }
        self.state = PlaybackState::Ready;

        let total = self.session.as_ref().map_or(0, PlaybackSession::len);
        self.renderer.clear();
        self.renderer.update_progress(0, total);
        self.report_buttons();
    }

    fn cancel_pending(&mut self) {
        if let Some((handle, _)) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn report_buttons(&mut self) {
        let total = self.session.as_ref().map_or(0, PlaybackSession::len);
        let buttons = ButtonState::for_state(self.state, self.current_index(), total);
        self.renderer.update_buttons(buttons);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
