use async_trait::async_trait;
use ipsieve_common::config::Config;
use ipsieve_common::error::SourceFetchError;
use reqwest::Client;

use super::SourceFetcher;

/// Plain HTTP(S) GET with the configured fetch timeout.
pub struct HttpSourceFetcher {
    client: Client,
}

impl HttpSourceFetcher {
    pub fn new(cfg: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(cfg.fetch_timeout())
            .user_agent(cfg.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, SourceFetchError> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceFetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> SourceFetchError {
    if err.is_timeout() {
        SourceFetchError::Timeout
    } else {
        SourceFetchError::Transport(err.to_string())
    }
}
