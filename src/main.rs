use crate::app_config::AppConfig;
use crate::configured_position_source::ConfiguredPositionSource;
use crate::reporter::LocationReporter;
use crate::status_logger::LogStatusReporter;
use crate::stdout_navigator::StdoutNavigator;
use std::sync::Arc;
use tracing::info;

mod app_config;
mod configured_position_source;
mod domain;
mod extensions;
mod fix_deserializer;
mod reporter;
mod status_logger;
mod stdout_navigator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the redirect target, logs go to stderr
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_writer(std::io::stderr).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let reporter = LocationReporter::new(
        &config,
        Arc::new(ConfiguredPositionSource::new(&config)),
        Arc::new(LogStatusReporter),
        Arc::new(StdoutNavigator),
    )?;
    info!(collector = config.collector().url(), "✅  Initialized location reporter");

    let outcome = reporter.start(config.reporter().startup_delay()).await;
    info!(?outcome, "🏁 {} finished", env!("CARGO_PKG_NAME"));

    Ok(())
}
