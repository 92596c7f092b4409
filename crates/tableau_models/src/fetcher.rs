//! Plain HTTP download of rendered images.

use async_trait::async_trait;
use reqwest::Client;
use tableau_error::{HttpError, TableauResult};
use tableau_interface::ImageFetcher;
use tracing::{debug, instrument};

/// Fetches image bytes with a GET request.
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher sharing an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> TableauResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                HttpError::with_status(format!("GET {} returned {}", url, status), status.as_u16())
                    .into(),
            );
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Reading body of {} failed: {}", url, e)))?;

        debug!(size = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}
