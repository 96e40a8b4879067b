use crate::reporter::Navigator;
use async_trait::async_trait;
use tracing::info;

/// Hands the redirect target to the caller by printing it on stdout.
#[derive(Debug, Default)]
pub struct StdoutNavigator;

#[async_trait]
impl Navigator for StdoutNavigator {
    async fn navigate(&self, url: &str) {
        info!(%url, "Navigating");
        println!("{}", url);
    }
}
