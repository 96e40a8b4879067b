mod fix;
mod location_report;
mod position_options;

pub use fix::Fix;
pub use location_report::LocationReport;
pub use position_options::PositionOptions;
