//! Where a session's words came from, and what the last health probe said.

use std::fmt;

/// Which preparation path produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Enriched by the remote text-processing service.
    Remote,
    /// Segmented locally after the remote path was skipped or failed.
    Local,
}

impl ConnectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionMode::Remote => "remote",
            ConnectionMode::Local => "local",
        }
    }
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the most recent health probe, held per engine instance.
///
/// `None` until a probe has run; the coordinator treats that the same as
/// "reachable" and tries the remote path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub last_health_check_ok: Option<bool>,
}

impl ConnectionStatus {
    /// `true` unless a probe has explicitly reported the service as down.
    pub fn remote_worth_trying(&self) -> bool {
        self.last_health_check_ok != Some(false)
    }

    pub fn record(&mut self, ok: bool) {
        self.last_health_check_ok = Some(ok);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprobed_status_allows_remote() {
        let status = ConnectionStatus::default();
        assert!(status.last_health_check_ok.is_none());
        assert!(status.remote_worth_trying());
    }

    #[test]
    fn failed_probe_skips_remote() {
        let mut status = ConnectionStatus::default();
        status.record(false);
        assert!(!status.remote_worth_trying());
        status.record(true);
        assert!(status.remote_worth_trying());
    }

    #[test]
    fn mode_labels() {
        assert_eq!(ConnectionMode::Remote.to_string(), "remote");
        assert_eq!(ConnectionMode::Local.label(), "local");
    }
}
