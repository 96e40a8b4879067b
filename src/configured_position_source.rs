use crate::app_config::AppConfig;
use crate::domain::{Fix, PositionOptions};
use crate::reporter::{PositionError, PositionSource};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A [`PositionSource`] backed by the `[position]` configuration section.
#[derive(Debug)]
pub struct ConfiguredPositionSource {
    fix: Option<Fix>,
    share_location: bool,
}

impl ConfiguredPositionSource {
    pub fn new(config: &AppConfig) -> Self {
        ConfiguredPositionSource {
            fix: config.position().fix().cloned(),
            share_location: config.position().share_location(),
        }
    }
}

#[async_trait]
impl PositionSource for ConfiguredPositionSource {
    fn is_supported(&self) -> bool {
        self.fix.is_some()
    }

    #[instrument(skip(self))]
    async fn current_position(&self, options: &PositionOptions) -> Result<Fix, PositionError> {
        if !self.share_location {
            return Err(PositionError::PermissionDenied);
        }

        // A configured fix is always fresh and exact, the options only end up in the log
        debug!(high_accuracy = options.high_accuracy, maximum_age = ?options.maximum_age, "Reading the configured fix");
        self.fix.clone().ok_or_else(|| PositionError::Unavailable("no fix configured".to_string()))
    }
}
