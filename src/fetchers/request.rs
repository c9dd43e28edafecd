use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::Fetcher;
use crate::config::HttpConfig;
use crate::error::ImportError;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
