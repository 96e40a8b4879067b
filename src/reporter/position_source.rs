use crate::domain::{Fix, PositionOptions};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Provides single position samples, e.g. a GPS receiver or a statically configured location.
#[async_trait]
pub trait PositionSource: Debug + Send + Sync {
    /// Whether this source can produce a fix at all.
    fn is_supported(&self) -> bool;

    async fn current_position(&self, options: &PositionOptions) -> Result<Fix, PositionError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("permission to access the location was denied")]
    PermissionDenied,
    #[error("no position acquired within {0:?}")]
    Timeout(Duration),
    #[error("position unavailable: {0}")]
    Unavailable(String),
}
