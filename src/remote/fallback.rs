//! Fallback coordinator — prefers the enrichment service, degrades to local
//! segmentation.
//!
//! ```text
//! prepare(text, status)
//!   ├─ remote configured && status allows ─▶ prepare_remote(text)
//!   │     ├─ Ok(slots)  ─▶ session (Remote)
//!   │     └─ Err(e)     ─▶ warn, segment + ORP table ─▶ session (Local)
//!   └─ otherwise                          ─▶ segment + ORP table ─▶ session (Local)
//! no words at the end (pauses alone don't count) ─▶ PrepareError::NoContent
//! ```
//!
//! Remote errors never leave this module; only "nothing to read" does.

use std::sync::Arc;

use thiserror::Error;

use crate::remote::preparer::RemotePreparer;
use crate::session::{ConnectionMode, ConnectionStatus, PlaybackSession, Word};
use crate::text::segment;

// ---------------------------------------------------------------------------
// PrepareError
// ---------------------------------------------------------------------------

/// The only failure `prepare` surfaces to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("no usable words in the text")]
    NoContent,
}

// ---------------------------------------------------------------------------
// FallbackCoordinator
// ---------------------------------------------------------------------------

/// Single entry point for turning text into a [`PlaybackSession`].
pub struct FallbackCoordinator {
    remote: Option<Arc<dyn RemotePreparer>>,
}

impl FallbackCoordinator {
    /// Try `remote` first, falling back to local segmentation.
    pub fn new(remote: Arc<dyn RemotePreparer>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    /// Never contact a service; always segment locally.
    pub fn local_only() -> Self {
        Self { remote: None }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Prepare `text` for playback.
    pub async fn prepare(
        &self,
        text: &str,
        status: &ConnectionStatus,
    ) -> Result<PlaybackSession, PrepareError> {
        let session = match &self.remote {
            Some(remote) if status.remote_worth_trying() => {
                match remote.prepare_remote(text).await {
                    Ok(slots) => PlaybackSession::from_slots(slots, ConnectionMode::Remote),
                    Err(e) => {
                        log::warn!("prepare: {e}; falling back to local segmentation");
                        prepare_local(text)
                    }
                }
            }
            Some(_) => {
                log::debug!("prepare: last health probe failed, skipping remote");
                prepare_local(text)
            }
            None => prepare_local(text),
        };

        if !session.has_words() {
            return Err(PrepareError::NoContent);
        }

        log::info!(
            "prepare: loaded {} words in {} slots ({} processing)",
            session.word_count(),
            session.len(),
            session.connection_mode()
        );
        Ok(session)
    }
}

/// Whitespace segmentation plus the ORP lookup table.
pub fn prepare_local(text: &str) -> PlaybackSession {
    let words = segment(text)
        .into_iter()
        .filter_map(|token| match Word::new(token, false) {
            Ok(word) => Some(word),
            Err(e) => {
                log::warn!("prepare: skipping token: {e}");
                None
            }
        })
        .collect();
    PlaybackSession::new(words, ConnectionMode::Local)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::preparer::RemoteError;
    use crate::session::Slot;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always returns the given error, counting calls.
    struct AlwaysFails {
        error: RemoteError,
        calls: AtomicUsize,
    }

    impl AlwaysFails {
        fn new(error: RemoteError) -> Arc<Self> {
            Arc::new(Self {
                error,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RemotePreparer for AlwaysFails {
        async fn prepare_remote(&self, _text: &str) -> Result<Vec<Slot>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error.clone())
        }
    }

    /// Marks every word as a heading so tests can tell the sources apart.
    struct Headings;

    #[async_trait]
    impl RemotePreparer for Headings {
        async fn prepare_remote(&self, text: &str) -> Result<Vec<Slot>, RemoteError> {
            Ok(text
                .split_whitespace()
                .map(|t| Slot::Word(Word::with_orp(t, 0, true).unwrap()))
                .collect())
        }
    }

    fn orp_indices(session: &PlaybackSession) -> Vec<usize> {
        session.words().map(Word::orp_index).collect()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unavailable_remote_falls_back_to_local() {
        let remote = AlwaysFails::new(RemoteError::Unavailable("connection refused".into()));
        let coordinator = FallbackCoordinator::new(remote.clone());

        let session = coordinator
            .prepare("hello world", &ConnectionStatus::default())
            .await
            .unwrap();

        assert_eq!(session.connection_mode(), ConnectionMode::Local);
        assert_eq!(session.texts(), vec!["hello", "world"]);
        assert_eq!(orp_indices(&session), vec![1, 1]);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_response_falls_back_to_local() {
        let remote = AlwaysFails::new(RemoteError::InvalidResponse("success = false".into()));
        let coordinator = FallbackCoordinator::new(remote);

        let session = coordinator
            .prepare("Speed reading is great", &ConnectionStatus::default())
            .await
            .unwrap();

        assert_eq!(session.connection_mode(), ConnectionMode::Local);
        assert_eq!(session.texts(), vec!["Speed", "reading", "is", "great"]);
        assert_eq!(orp_indices(&session), vec![1, 2, 0, 1]);
        assert!(session.words().all(|w| !w.is_heading()));
    }

    #[tokio::test]
    async fn remote_success_is_used_directly() {
        let coordinator = FallbackCoordinator::new(Arc::new(Headings));

        let session = coordinator
            .prepare("TITLE here", &ConnectionStatus::default())
            .await
            .unwrap();

        assert_eq!(session.connection_mode(), ConnectionMode::Remote);
        assert!(session.words().all(Word::is_heading));
        assert_eq!(orp_indices(&session), vec![0, 0]);
    }

    #[tokio::test]
    async fn remote_pauses_reach_the_session() {
        struct Paced;

        #[async_trait]
        impl RemotePreparer for Paced {
            async fn prepare_remote(&self, _text: &str) -> Result<Vec<Slot>, RemoteError> {
                Ok(vec![
                    Slot::Word(Word::new("Stop.", false).unwrap()),
                    Slot::Pause,
                    Slot::Word(Word::new("Go", false).unwrap()),
                ])
            }
        }

        let session = FallbackCoordinator::new(Arc::new(Paced))
            .prepare("Stop. Go", &ConnectionStatus::default())
            .await
            .unwrap();

        assert_eq!(session.len(), 3);
        assert_eq!(session.word_count(), 2);
        assert!(session.slots()[1].is_pause());
    }

    #[tokio::test]
    async fn failed_probe_skips_remote_call() {
        let remote = AlwaysFails::new(RemoteError::Unavailable("down".into()));
        let coordinator = FallbackCoordinator::new(remote.clone());
        let mut status = ConnectionStatus::default();
        status.record(false);

        let session = coordinator.prepare("a b", &status).await.unwrap();

        assert_eq!(session.connection_mode(), ConnectionMode::Local);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn local_only_never_calls_remote() {
        let coordinator = FallbackCoordinator::local_only();
        assert!(!coordinator.has_remote());

        let session = coordinator
            .prepare("just local", &ConnectionStatus::default())
            .await
            .unwrap();
        assert_eq!(session.connection_mode(), ConnectionMode::Local);
    }

    #[tokio::test]
    async fn blank_text_is_no_content() {
        let coordinator =
            FallbackCoordinator::new(AlwaysFails::new(RemoteError::Unavailable("x".into())));

        for text in ["", "   ", "\n\t"] {
            assert_eq!(
                coordinator.prepare(text, &ConnectionStatus::default()).await,
                Err(PrepareError::NoContent)
            );
        }
    }

    #[tokio::test]
    async fn empty_remote_result_is_no_content() {
        struct Empty;

        #[async_trait]
        impl RemotePreparer for Empty {
            async fn prepare_remote(&self, _text: &str) -> Result<Vec<Slot>, RemoteError> {
                Ok(vec![Slot::Pause, Slot::Pause])
            }
        }

        let coordinator = FallbackCoordinator::new(Arc::new(Empty));
        assert_eq!(
            coordinator
                .prepare("only pauses", &ConnectionStatus::default())
                .await,
            Err(PrepareError::NoContent)
        );
    }
}
