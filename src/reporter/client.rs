use crate::app_config::AppConfig;
use crate::domain::LocationReport;
use crate::reporter::collector_response::CollectorResponse;
use reqwest::header::HeaderValue;
use reqwest::{header, redirect, Client, StatusCode};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Posts location reports to the collector endpoint.
#[derive(Debug, Clone)]
pub struct CollectorClient {
    client: Client,
    url: String,
}

impl CollectorClient {
    pub fn new(config: &AppConfig) -> Result<Self, CollectorError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_str(config.reporter().user_agent())?);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        // A 3xx from the collector is a failed submission, not something to follow
        let client = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .timeout(config.collector().request_timeout())
            .build()?;

        Ok(CollectorClient {
            client,
            url: config.collector().url().to_string(),
        })
    }

    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn send(&self, report: &LocationReport) -> Result<CollectorResponse, CollectorError> {
        info!("Sending location report...");
        let response = self.client.post(&self.url).json(report).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await;
            warn!(status_code = %status, "⚠️ Collector rejected the location report. Response: {:?}", body);
            return Err(CollectorError::UnexpectedStatus(status));
        }

        let body = response.bytes().await?;
        let collector_response = serde_json::from_slice::<CollectorResponse>(&body)?;
        info!(status_code = %status, "Sending location report... OK");

        Ok(collector_response)
    }
}

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("collector client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
    #[error("collector responded with status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("collector responded with an invalid body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}
