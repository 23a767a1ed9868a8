//! Playback module — paces a prepared session's words onto a renderer.
//!
//! # Architecture
//!
//! ```text
//! PlaybackController::play()
//!        │  schedule_repeating(floor(60000 / wpm) ms)
//!        ▼
//! Scheduler ──TimerEvent──▶ owner's loop ──▶ PlaybackController::on_timer()
//!                                                   │
//!                                                   ├─ Renderer::display(before, orp, after, heading)
//!                                                   ├─ Renderer::update_progress(current, total)
//!                                                   └─ Renderer::update_buttons(..)  (on transitions)
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use speed_reader::config::PlaybackConfig;
//! use speed_reader::playback::{PlaybackController, PlaybackState, Renderer, ButtonState, TokioScheduler};
//! use speed_reader::remote::prepare_local;
//!
//! struct Stdout;
//!
//! impl Renderer for Stdout {
//!     fn display(&mut self, before: &str, orp: char, after: &str, _heading: bool) {
//!         println!("{before}[{orp}]{after}");
//!     }
//!     fn clear(&mut self) {}
//!     fn update_progress(&mut self, _current: usize, _total: usize) {}
//!     fn update_buttons(&mut self, _buttons: ButtonState) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (scheduler, mut timers) = TokioScheduler::new();
//!     let mut controller = PlaybackController::new(scheduler, Stdout, &PlaybackConfig::default());
//!
//!     controller.load(prepare_local("Speed reading is great"));
//!     controller.play().unwrap();
//!     while controller.state() == PlaybackState::Playing {
//!         let Some(event) = timers.recv().await else { break };
//!         controller.on_timer(event);
//!     }
//! }
//! ```

pub mod controller;
pub mod renderer;
pub mod scheduler;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{PlaybackController, PlaybackError};
pub use renderer::Renderer;
pub use scheduler::{
    ManualScheduler, Scheduler, SchedulerCall, TimerEvent, TimerHandle, TimerKind, TokioScheduler,
};
pub use state::{ButtonState, PlaybackState};
