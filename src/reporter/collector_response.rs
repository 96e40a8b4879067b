use serde::Deserialize;

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectorResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub redirect_url: Option<String>,
}

impl CollectorResponse {
    /// The redirect target, an empty string counts as absent.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_url.as_deref().filter(|url| !url.is_empty())
    }
}
