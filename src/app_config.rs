use crate::domain::{Fix, PositionOptions};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    reporter: Reporter,
    collector: Collector,
    position: Position,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("LOCATOR").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

#[derive(Debug, Deserialize)]
pub struct Reporter {
    #[serde(with = "humantime_serde")]
    startup_delay: Duration,
    user_agent: String,
}

impl Reporter {
    pub fn startup_delay(&self) -> Duration {
        self.startup_delay
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, Deserialize)]
pub struct Collector {
    url: String,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Collector {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Position {
    share_location: bool,
    high_accuracy: bool,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    #[serde(with = "humantime_serde")]
    maximum_age: Duration,
    fix: Option<Fix>,
}

impl Position {
    pub fn share_location(&self) -> bool {
        self.share_location
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.high_accuracy,
            timeout: self.timeout,
            maximum_age: self.maximum_age,
        }
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                reporter: Reporter {
                    startup_delay: Duration::ZERO,
                    user_agent: "locator-test".to_string(),
                },
                collector: Collector {
                    url: "http://collector.url/api/locations".to_string(),
                    request_timeout: Duration::from_secs(2),
                },
                position: Position {
                    share_location: true,
                    high_accuracy: true,
                    timeout: Duration::from_millis(10_000),
                    maximum_age: Duration::ZERO,
                    fix: Some(Fix::new(37.7, -122.4, 5.0)),
                },
            },
        }
    }

    pub fn collector_url(mut self, url: String) -> Self {
        self.config.collector.url = url;
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.reporter.user_agent = user_agent.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.collector.request_timeout = timeout;
        self
    }

    pub fn position_timeout(mut self, timeout: Duration) -> Self {
        self.config.position.timeout = timeout;
        self
    }

    pub fn share_location(mut self, share_location: bool) -> Self {
        self.config.position.share_location = share_location;
        self
    }

    pub fn fix(mut self, fix: Option<Fix>) -> Self {
        self.config.position.fix = fix;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
