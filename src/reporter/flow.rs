use crate::app_config::AppConfig;
use crate::domain::{LocationReport, PositionOptions};
use crate::reporter::client::{CollectorClient, CollectorError};
use crate::reporter::navigator::Navigator;
use crate::reporter::position_source::{PositionError, PositionSource};
use crate::reporter::status::{Status, StatusReporter};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// The state a report ends in. Only [`Outcome::Redirecting`] leaves the flow, every other outcome is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unsupported,
    Denied,
    TransmitError,
    Redirecting(String),
    NoRedirectTarget,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("no position capability available")]
    UnsupportedCapability,
    #[error(transparent)]
    PermissionOrSensorFailure(#[from] PositionError),
    #[error(transparent)]
    NetworkOrServerFailure(#[from] CollectorError),
    #[error("collector response has no redirect target")]
    MissingRedirectTarget,
}

impl ReportError {
    fn status(&self) -> Status {
        match self {
            ReportError::UnsupportedCapability => Status::Unsupported,
            ReportError::PermissionOrSensorFailure(_) => Status::AccessDenied,
            ReportError::NetworkOrServerFailure(_) => Status::TransmitFailed,
            ReportError::MissingRedirectTarget => Status::RedirectNotFound,
        }
    }

    fn outcome(&self) -> Outcome {
        match self {
            ReportError::UnsupportedCapability => Outcome::Unsupported,
            ReportError::PermissionOrSensorFailure(_) => Outcome::Denied,
            ReportError::NetworkOrServerFailure(_) => Outcome::TransmitError,
            ReportError::MissingRedirectTarget => Outcome::NoRedirectTarget,
        }
    }
}

/// Acquires a fix, sends it to the collector and follows the redirect target it returns.
#[derive(Debug)]
pub struct LocationReporter {
    collector: CollectorClient,
    position_source: Arc<dyn PositionSource>,
    status: Arc<dyn StatusReporter>,
    navigator: Arc<dyn Navigator>,
    options: PositionOptions,
    user_agent: String,
}

impl LocationReporter {
    pub fn new(
        config: &AppConfig,
        position_source: Arc<dyn PositionSource>,
        status: Arc<dyn StatusReporter>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, CollectorError> {
        Ok(LocationReporter {
            collector: CollectorClient::new(config)?,
            position_source,
            status,
            navigator,
            options: config.position().options(),
            user_agent: config.reporter().user_agent().to_string(),
        })
    }

    /// Waits for `delay` before running [`LocationReporter::acquire_and_report`].
    pub async fn start(&self, delay: Duration) -> Outcome {
        debug!("Starting location report in {:?}", delay);
        sleep(delay).await;
        self.acquire_and_report().await
    }

    #[instrument(skip(self))]
    pub async fn acquire_and_report(&self) -> Outcome {
        match self.report().await {
            Ok(url) => {
                info!(%url, "➡️ Redirecting to '{}'", url);
                self.navigator.navigate(&url).await;
                Outcome::Redirecting(url)
            }
            Err(e) => {
                let status = e.status();
                match &e {
                    ReportError::UnsupportedCapability | ReportError::MissingRedirectTarget => info!("{}", status),
                    ReportError::PermissionOrSensorFailure(_) => warn!("⚠️ Location denied or unavailable: {}", e),
                    ReportError::NetworkOrServerFailure(_) => warn!("⚠️ Unable to send the location: {}", e),
                }
                self.status.report(status);
                e.outcome()
            }
        }
    }

    async fn report(&self) -> Result<String, ReportError> {
        if !self.position_source.is_supported() {
            return Err(ReportError::UnsupportedCapability);
        }

        self.status.report(Status::RequestingAccess);
        let fix = match timeout(self.options.timeout, self.position_source.current_position(&self.options)).await {
            Ok(result) => result?,
            Err(_) => return Err(PositionError::Timeout(self.options.timeout).into()),
        };
        debug!(?fix, "Acquired fix");

        let report = LocationReport::new(&fix, Utc::now(), &self.user_agent);

        self.status.report(Status::Sending);
        let response = self.collector.send(&report).await?;

        self.status.report(Status::CompletingRedirect);
        response
            .redirect_target()
            .map(str::to_string)
            .ok_or(ReportError::MissingRedirectTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::Fix;
    use async_trait::async_trait;
    use mockito::{Matcher, Server, ServerGuard};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Instant;
    use test_log::test;

    #[derive(Debug)]
    struct FakePositionSource {
        supported: bool,
        result: Result<Fix, PositionError>,
        delay: Duration,
    }

    impl FakePositionSource {
        fn returning(result: Result<Fix, PositionError>) -> Arc<Self> {
            Arc::new(FakePositionSource {
                supported: true,
                result,
                delay: Duration::ZERO,
            })
        }
    }

    #[async_trait]
    impl PositionSource for FakePositionSource {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn current_position(&self, _options: &PositionOptions) -> Result<Fix, PositionError> {
            sleep(self.delay).await;
            self.result.clone()
        }
    }

    #[derive(Debug, Default)]
    struct RecordingStatusReporter {
        statuses: Mutex<Vec<Status>>,
    }

    impl RecordingStatusReporter {
        fn statuses(&self) -> Vec<Status> {
            self.statuses.lock().unwrap().clone()
        }
    }

    impl StatusReporter for RecordingStatusReporter {
        fn report(&self, status: Status) {
            self.statuses.lock().unwrap().push(status);
        }
    }

    #[derive(Debug, Default)]
    struct RecordingNavigator {
        urls: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Navigator for RecordingNavigator {
        async fn navigate(&self, url: &str) {
            self.urls.lock().unwrap().push(url.to_string());
        }
    }

    struct Harness {
        reporter: LocationReporter,
        status: Arc<RecordingStatusReporter>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness(collector_url: String, position_source: Arc<dyn PositionSource>) -> Harness {
        let config = AppConfigBuilder::new().collector_url(collector_url).build();
        harness_with(&config, position_source)
    }

    fn harness_with(config: &AppConfig, position_source: Arc<dyn PositionSource>) -> Harness {
        let status = Arc::new(RecordingStatusReporter::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let reporter = LocationReporter::new(config, position_source, status.clone(), navigator.clone()).unwrap();

        Harness { reporter, status, navigator }
    }

    async fn collector() -> ServerGuard {
        Server::new_async().await
    }

    fn locations_url(server: &ServerGuard) -> String {
        format!("{}/api/locations", server.url())
    }

    #[test(tokio::test)]
    async fn redirects_to_the_url_returned_by_the_collector() {
        let mut server = collector().await;
        let mock = server
            .mock("POST", "/api/locations")
            .match_body(Matcher::PartialJson(json!({ "latitude": 37.7, "longitude": -122.4, "accuracy": 5.0 })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "message": "Location stored successfully", "redirectUrl": "https://example.com/ok"}"#)
            .create_async()
            .await;
        let h = harness(locations_url(&server), FakePositionSource::returning(Ok(Fix::new(37.7, -122.4, 5.0))));

        let outcome = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(outcome, Outcome::Redirecting("https://example.com/ok".to_string()));
        assert_eq!(h.navigator.urls(), vec!["https://example.com/ok".to_string()]);
        assert_eq!(h.status.statuses(), vec![Status::RequestingAccess, Status::Sending, Status::CompletingRedirect]);
    }

    #[test(tokio::test)]
    async fn reports_unsupported_without_contacting_the_collector() {
        let mut server = collector().await;
        let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;
        let position_source = Arc::new(FakePositionSource {
            supported: false,
            result: Ok(Fix::default()),
            delay: Duration::ZERO,
        });
        let h = harness(locations_url(&server), position_source);

        let outcome = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(outcome, Outcome::Unsupported);
        assert_eq!(h.status.statuses(), vec![Status::Unsupported]);
        assert_eq!(h.status.statuses()[0].to_string(), "Geolocation not supported.");
        assert!(h.navigator.urls().is_empty());
    }

    #[test(tokio::test)]
    async fn reports_denied_when_permission_is_refused() {
        let mut server = collector().await;
        let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;
        let h = harness(locations_url(&server), FakePositionSource::returning(Err(PositionError::PermissionDenied)));

        let outcome = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(outcome, Outcome::Denied);
        assert_eq!(h.status.statuses(), vec![Status::RequestingAccess, Status::AccessDenied]);
        assert!(h.navigator.urls().is_empty());
    }

    #[test(tokio::test)]
    async fn reports_denied_when_the_source_is_unavailable() {
        let h = harness(
            "http://127.0.0.1:1/api/locations".to_string(),
            FakePositionSource::returning(Err(PositionError::Unavailable("no satellites".to_string()))),
        );

        let outcome = h.reporter.acquire_and_report().await;

        assert_eq!(outcome, Outcome::Denied);
        assert_eq!(h.status.statuses().last(), Some(&Status::AccessDenied));
    }

    #[test(tokio::test)]
    async fn reports_denied_when_the_fix_takes_longer_than_the_position_timeout() {
        let mut server = collector().await;
        let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;
        let config = AppConfigBuilder::new()
            .collector_url(locations_url(&server))
            .position_timeout(Duration::from_millis(50))
            .build();
        let position_source = Arc::new(FakePositionSource {
            supported: true,
            result: Ok(Fix::new(37.7, -122.4, 5.0)),
            delay: Duration::from_secs(5),
        });
        let h = harness_with(&config, position_source);

        let started = Instant::now();
        let outcome = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(outcome, Outcome::Denied);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(h.status.statuses(), vec![Status::RequestingAccess, Status::AccessDenied]);
    }

    #[test(tokio::test)]
    async fn reports_an_error_and_does_not_navigate_for_a_server_error() {
        let mut server = collector().await;
        let mock = server
            .mock("POST", "/api/locations")
            .with_status(500)
            .with_body(r#"{"redirectUrl": "https://example.com/ok"}"#)
            .create_async()
            .await;
        let h = harness(locations_url(&server), FakePositionSource::returning(Ok(Fix::new(37.7, -122.4, 5.0))));

        let outcome = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(outcome, Outcome::TransmitError);
        assert_eq!(h.status.statuses(), vec![Status::RequestingAccess, Status::Sending, Status::TransmitFailed]);
        assert_eq!(h.status.statuses()[2].to_string(), "Error processing location. Redirection cancelled.");
        assert!(h.navigator.urls().is_empty());
    }

    #[test(tokio::test)]
    async fn reports_an_error_when_the_collector_is_unreachable() {
        let h = harness(
            "http://127.0.0.1:1/api/locations".to_string(),
            FakePositionSource::returning(Ok(Fix::new(37.7, -122.4, 5.0))),
        );

        let outcome = h.reporter.acquire_and_report().await;

        assert_eq!(outcome, Outcome::TransmitError);
        assert_eq!(h.status.statuses().last(), Some(&Status::TransmitFailed));
        assert!(h.navigator.urls().is_empty());
    }

    #[test(tokio::test)]
    async fn reports_not_found_when_the_response_has_no_redirect_url() {
        let mut server = collector().await;
        server
            .mock("POST", "/api/locations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "message": "Location stored successfully"}"#)
            .create_async()
            .await;
        let h = harness(locations_url(&server), FakePositionSource::returning(Ok(Fix::new(37.7, -122.4, 5.0))));

        let outcome = h.reporter.acquire_and_report().await;

        assert_eq!(outcome, Outcome::NoRedirectTarget);
        assert_eq!(
            h.status.statuses(),
            vec![Status::RequestingAccess, Status::Sending, Status::CompletingRedirect, Status::RedirectNotFound]
        );
        assert!(h.navigator.urls().is_empty());
    }

    #[test(tokio::test)]
    async fn every_invocation_sends_its_own_report() {
        let mut server = collector().await;
        let mock = server
            .mock("POST", "/api/locations")
            .match_body(Matcher::Regex(r#""timestamp":"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z""#.to_string()))
            .with_status(201)
            .with_body(r#"{"redirectUrl": "https://example.com/ok"}"#)
            .expect(2)
            .create_async()
            .await;
        let h = harness(locations_url(&server), FakePositionSource::returning(Ok(Fix::new(37.7, -122.4, 5.0))));

        let first = h.reporter.acquire_and_report().await;
        let second = h.reporter.acquire_and_report().await;

        mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(h.navigator.urls().len(), 2);
    }

    #[test(tokio::test)]
    async fn start_waits_for_the_startup_delay() {
        let h = harness(
            "http://127.0.0.1:1/api/locations".to_string(),
            FakePositionSource::returning(Err(PositionError::PermissionDenied)),
        );

        let started = Instant::now();
        let outcome = h.reporter.start(Duration::from_millis(100)).await;

        assert_eq!(outcome, Outcome::Denied);
        assert!(started.elapsed() >= Duration::from_millis(100));
    }
}
