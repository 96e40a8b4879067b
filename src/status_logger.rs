use crate::reporter::{Status, StatusReporter};
use tracing::info;

/// Shows every status change in the log.
#[derive(Debug, Default)]
pub struct LogStatusReporter;

impl StatusReporter for LogStatusReporter {
    fn report(&self, status: Status) {
        info!(?status, "📍 {}", status);
    }
}
