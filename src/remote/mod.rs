//! Text preparation against the enrichment service, with local fallback.
//!
//! This module provides:
//! * [`RemotePreparer`] — async trait for enrichment backends.
//! * [`HttpPreparer`] — `POST /process-text` client.
//! * [`HealthProbe`] / [`HttpHealthProbe`] — `GET /health` with a hard timeout.
//! * [`FallbackCoordinator`] — the single `prepare(text)` entry point.
//! * [`RemoteError`] / [`PrepareError`] — error variants.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use speed_reader::config::AppConfig;
//! use speed_reader::remote::{FallbackCoordinator, HttpPreparer};
//! use speed_reader::session::ConnectionStatus;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let coordinator =
//!         FallbackCoordinator::new(Arc::new(HttpPreparer::from_config(&config.backend)));
//!
//!     // Falls back to local segmentation when the service is down.
//!     let session = coordinator
//!         .prepare("Speed reading is great", &ConnectionStatus::default())
//!         .await
//!         .unwrap();
//!     println!("{} words via {}", session.len(), session.connection_mode());
//! }
//! ```

pub mod fallback;
pub mod health;
pub mod preparer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use fallback::{prepare_local, FallbackCoordinator, PrepareError};
pub use health::{HealthProbe, HttpHealthProbe, HEALTH_TIMEOUT};
pub use preparer::{parse_response, HttpPreparer, RemoteError, RemotePreparer};
