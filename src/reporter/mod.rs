mod client;
mod collector_response;
mod flow;
mod navigator;
mod position_source;
mod status;

pub use flow::LocationReporter;
pub use navigator::Navigator;
pub use position_source::{PositionError, PositionSource};
pub use status::{Status, StatusReporter};
