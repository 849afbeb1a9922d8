use async_trait::async_trait;
use kiosk_common::PlatformError;

use crate::traits::ImageFetch;

/// Notification icon download over HTTP(S).
pub struct HttpImageFetch {
    client: reqwest::Client,
}

impl HttpImageFetch {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetch for HttpImageFetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlatformError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlatformError::FetchError(format!(
                "{url} returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlatformError::FetchError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
