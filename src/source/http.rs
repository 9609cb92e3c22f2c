use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::source::ChunkSource;

/// Streams the body of an HTTP GET, chunk by chunk as it arrives.
///
/// A non-success status is an origin failure.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    response: Option<reqwest::Response>,
    done: bool,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            response: None,
            done: false,
        }
    }
}

#[async_trait]
impl ChunkSource for HttpSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.done {
            return Ok(None);
        }
        let response = match self.response.as_mut() {
            Some(response) => response,
            None => {
                let fetched = self
                    .client
                    .get(&self.url)
                    .send()
                    .await?
                    .error_for_status()?;
                self.response.insert(fetched)
            }
        };

        match response.chunk().await? {
            Some(chunk) => Ok(Some(chunk)),
            None => {
                self.done = true;
                self.response = None;
                Ok(None)
            }
        }
    }
}
