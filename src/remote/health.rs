//! Liveness probe for the enrichment service.
//!
//! The probe is advisory: it pre-seeds [`ConnectionStatus`] so the
//! coordinator can skip a service that is known to be down.  It never
//! raises, and a slow service is cut off after [`HEALTH_TIMEOUT`] by
//! dropping the in-flight request.
//!
//! [`ConnectionStatus`]: crate::session::ConnectionStatus

use std::time::Duration;

use async_trait::async_trait;

use crate::config::BackendConfig;

/// Fixed upper bound on a health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Anything that can answer "is the service up?".
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// `true` only for a 2xx answer inside the time bound.
    async fn check_health(&self) -> bool;
}

/// `GET {health_url}` with a hard timeout.
pub struct HttpHealthProbe {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.health_url.clone(), HEALTH_TIMEOUT)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check_health(&self) -> bool {
        log::debug!("health: probing {}", self.url);

        match tokio::time::timeout(self.timeout, self.client.get(&self.url).send()).await {
            Ok(Ok(response)) if response.status().is_success() => {
                log::info!("health: enrichment service is available");
                true
            }
            Ok(Ok(response)) => {
                log::info!(
                    "health: service answered {}; using local processing",
                    response.status()
                );
                false
            }
            Ok(Err(e)) => {
                log::info!("health: service unreachable ({e}); using local processing");
                false
            }
            Err(_) => {
                log::info!(
                    "health: no answer within {} ms; using local processing",
                    self.timeout.as_millis()
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::test_server::serve;
    use axum::{http::StatusCode, routing::get, Json, Router};

    #[tokio::test]
    async fn healthy_service() {
        let router = Router::new().route(
            "/health",
            get(|| async { Json(serde_json::json!({ "status": "healthy" })) }),
        );
        let base = serve(router).await;

        let probe = HttpHealthProbe::new(format!("{base}/health"), Duration::from_secs(2));
        assert!(probe.check_health().await);
    }

    #[tokio::test]
    async fn non_success_status_is_unhealthy() {
        let router = Router::new().route(
            "/health",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(router).await;

        let probe = HttpHealthProbe::new(format!("{base}/health"), Duration::from_secs(2));
        assert!(!probe.check_health().await);
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let router = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "late"
            }),
        );
        let base = serve(router).await;

        let probe = HttpHealthProbe::new(format!("{base}/health"), Duration::from_millis(50));
        assert!(!probe.check_health().await);
    }

    #[tokio::test]
    async fn unreachable_service_is_unhealthy() {
        let probe = HttpHealthProbe::new("http://127.0.0.1:1/health", Duration::from_secs(2));
        assert!(!probe.check_health().await);
    }

    #[test]
    fn from_config_uses_health_settings() {
        let probe = HttpHealthProbe::from_config(&BackendConfig::default());
        assert_eq!(probe.url, "http://localhost:5000/health");
        assert_eq!(probe.timeout, HEALTH_TIMEOUT);
        assert_eq!(HEALTH_TIMEOUT, Duration::from_millis(2_000));
    }
}
