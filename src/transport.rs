//! HTTP transport
//! POSTs JSON bodies to vendor endpoints and reads plain or streamed replies

use std::time::Duration;

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AiError, Result};
use crate::providers::constants::STREAM_BLOCK_SIZE;

/// One HTTP client per adapter instance, carrying its auth header and timeout
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// `timeout_secs` of 0 means no timeout.
    /// `bearer` is sent as `Authorization: Bearer <token>` on every request
    pub fn new(timeout_secs: u64, bearer: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| AiError::Config("API key contains invalid header characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        // 0 disables the timeout
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| AiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Single round trip; the reply must be JSON
    pub async fn request(&self, url: &Url, body: &Value) -> Result<Value> {
        debug!(endpoint = %redact(url), "sending chat request");

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(endpoint = %redact(url), status = status.as_u16(), "vendor rejected request");
            return Err(AiError::from_status(status, text));
        }

        serde_json::from_str(&text)
            .map_err(|e| AiError::Transport(format!("Failed to decode response: {e}")))
    }

    /// Streams the reply body as raw blocks of at most [`STREAM_BLOCK_SIZE`]
    /// bytes, in arrival order. Every failure surfaces as `AiError::Transport`.
    pub fn stream_request(
        &self,
        url: Url,
        body: Value,
    ) -> impl Stream<Item = Result<Vec<u8>>> + Send + 'static {
        let client = self.client.clone();

        try_stream! {
            debug!(endpoint = %redact(&url), "sending streaming chat request");

            let response = client
                .post(url.clone())
                .json(&body)
                .send()
                .await
                .map_err(|e| AiError::Transport(format!("Stream request error: {}", e.without_url())))?;

            let status = response.status();
            let response = if status.is_success() {
                response
            } else {
                warn!(endpoint = %redact(&url), status = status.as_u16(), "vendor rejected stream");
                let text = response.text().await.unwrap_or_default();
                Err(AiError::Transport(format!("Stream request error: {status}: {text}")))?
            };

            let mut chunks = response.bytes_stream();
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk
                    .map_err(|e| AiError::Transport(format!("Stream read error: {}", e.without_url())))?;
                for block in chunk.chunks(STREAM_BLOCK_SIZE) {
                    yield block.to_vec();
                }
            }
            debug!(endpoint = %redact(&url), "stream finished");
        }
    }
}

/// Endpoint without its query string, which may carry an API key
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_drops_query() {
        let url = Url::parse("https://example.com/v1/models/x:generateContent?key=secret").unwrap();
        assert_eq!(redact(&url), "https://example.com/v1/models/x:generateContent");
    }

    #[test]
    fn bearer_with_newline_is_rejected() {
        let err = HttpTransport::new(30, Some("bad\nkey")).unwrap_err();
        assert!(matches!(err, AiError::Config(_)));
    }
}
