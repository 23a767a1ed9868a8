//! [`ReaderEngine`] — one speed-reading engine instance.
//!
//! Bundles the pieces that share a lifetime: the fallback coordinator, the
//! optional health probe, the [`ConnectionStatus`] it refreshes, and the
//! playback controller.  Everything is reached through `&mut self`, so a
//! second `load_text` cannot start while one is still awaiting the network.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::playback::{
    PlaybackController, PlaybackError, PlaybackState, Renderer, Scheduler, TimerEvent,
};
use crate::remote::{
    FallbackCoordinator, HealthProbe, HttpHealthProbe, HttpPreparer, PrepareError,
};
use crate::session::{ConnectionMode, ConnectionStatus};

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// User-facing failures.  Both boil down to "nothing to read".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Prepare(#[from] PrepareError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

// ---------------------------------------------------------------------------
// ReaderEngine
// ---------------------------------------------------------------------------

pub struct ReaderEngine<S: Scheduler, R: Renderer> {
    coordinator: FallbackCoordinator,
    health: Option<Arc<dyn HealthProbe>>,
    status: ConnectionStatus,
    controller: PlaybackController<S, R>,
}

impl<S: Scheduler, R: Renderer> ReaderEngine<S, R> {
    pub fn new(
        coordinator: FallbackCoordinator,
        health: Option<Arc<dyn HealthProbe>>,
        controller: PlaybackController<S, R>,
    ) -> Self {
        Self {
            coordinator,
            health,
            status: ConnectionStatus::default(),
            controller,
        }
    }

    /// Wire HTTP clients from `config.backend`, or local-only processing
    /// when the backend is disabled.
    pub fn from_config(config: &AppConfig, scheduler: S, renderer: R) -> Self {
        let controller = PlaybackController::new(scheduler, renderer, &config.playback);

        if !config.backend.enabled {
            log::info!("engine: backend disabled, using local processing only");
            return Self::new(FallbackCoordinator::local_only(), None, controller);
        }

        let preparer = Arc::new(HttpPreparer::from_config(&config.backend));
        let probe: Arc<dyn HealthProbe> = Arc::new(HttpHealthProbe::from_config(&config.backend));
        Self::new(FallbackCoordinator::new(preparer), Some(probe), controller)
    }

    // -----------------------------------------------------------------------
    // Connection status
    // -----------------------------------------------------------------------

    /// Probe the enrichment service and remember the answer.
    ///
    /// Without a probe (local-only engine) the service counts as unreachable.
    pub async fn check_health(&mut self) -> bool {
        let ok = match &self.health {
            Some(probe) => probe.check_health().await,
            None => false,
        };
        self.status.record(ok);
        self.controller.renderer_mut().update_status(ok);
        ok
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Prepare `text` and load it into the controller (→ `Ready`).
    ///
    /// Playback is paused first.  On `NoContent` the previous session, if
    /// any, stays loaded.
    pub async fn load_text(&mut self, text: &str) -> Result<ConnectionMode, EngineError> {
        self.controller.pause();

        let session = self.coordinator.prepare(text, &self.status).await?;
        let mode = session.connection_mode();

        self.controller.renderer_mut().update_source(mode);
        self.controller.load(session);
        Ok(mode)
    }

    // -----------------------------------------------------------------------
    // Playback passthrough
    // -----------------------------------------------------------------------

    pub fn play(&mut self) -> Result<(), EngineError> {
        self.controller.play().map_err(EngineError::from)
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn restart(&mut self) {
        self.controller.restart();
    }

    pub fn change_speed(&mut self, wpm: u32) {
        self.controller.change_speed(wpm);
    }

    pub fn on_timer(&mut self, event: TimerEvent) {
        self.controller.on_timer(event);
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn controller(&self) -> &PlaybackController<S, R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<S, R> {
        &mut self.controller
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
