use std::time::Duration;

/// Options passed to a [`PositionSource`](crate::reporter::PositionSource) for a single sample.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// The maximum age of a cached sample, zero forces a fresh reading.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::ZERO,
        }
    }
}
