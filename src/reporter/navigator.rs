use async_trait::async_trait;
use std::fmt::Debug;

#[async_trait]
pub trait Navigator: Debug + Send + Sync {
    /// Leaves the current flow for `url`, the target is passed on exactly as received.
    async fn navigate(&self, url: &str);
}
