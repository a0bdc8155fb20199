use std::time::Duration;

use futures::StreamExt;
use url::Url;

use super::FeedError;

/// Network and size limits for loading a feed.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt for 429, 5xx, and truncated bodies.
    pub max_retries: u32,
    /// Maximum feed size in bytes (network body or local file).
    pub max_feed_bytes: usize,
    /// First backoff delay; doubles on every retry.
    pub retry_base_delay: Duration,
    /// Allow localhost and private network addresses.
    pub allow_private_hosts: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            max_feed_bytes: 10 * 1024 * 1024, // 10MB
            retry_base_delay: Duration::from_secs(1),
            allow_private_hosts: false,
        }
    }
}

/// Builds the HTTP client used for feed requests.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, FeedError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("rsshtml/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Downloads a feed body.
///
/// # Behavior
///
/// - Each request is bounded by `config.timeout`
/// - Rate limiting (HTTP 429) and server errors (5xx) trigger exponential
///   backoff with up to `config.max_retries` retries
/// - Other non-2xx statuses fail immediately
/// - Bodies larger than `config.max_feed_bytes` are rejected
/// - Bodies shorter than their Content-Length are retried like server errors
///
/// # Errors
///
/// - [`FeedError::Network`] - Connection or TLS errors
/// - [`FeedError::Timeout`] - Request exceeded the timeout
/// - [`FeedError::HttpStatus`] - Non-2xx HTTP response
/// - [`FeedError::RateLimited`] - 429 response after max retries
/// - [`FeedError::TooLarge`] - Body exceeded the size limit
/// - [`FeedError::IncompleteResponse`] - Truncated body after max retries
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &Url,
    config: &FetchConfig,
) -> Result<Vec<u8>, FeedError> {
    let mut retry_count = 0;

    loop {
        let response = tokio::time::timeout(config.timeout, client.get(url.clone()).send())
            .await
            .map_err(|_| FeedError::Timeout)?
            .map_err(FeedError::Network)?;

        let status = response.status();

        // EDGE-004: Handle rate limiting with exponential backoff
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            if retry_count >= config.max_retries {
                return Err(FeedError::RateLimited(config.max_retries));
            }
            let delay = backoff(config, retry_count);
            tracing::warn!(
                feed = %url,
                retry = retry_count,
                delay_ms = delay.as_millis() as u64,
                "Rate limited, backing off"
            );
            tokio::time::sleep(delay).await;
            retry_count += 1;
            continue;
        }

        if status.is_server_error() {
            if retry_count >= config.max_retries {
                return Err(FeedError::HttpStatus(status.as_u16()));
            }
            let delay = backoff(config, retry_count);
            tracing::warn!(
                feed = %url,
                status = %status,
                retry = retry_count,
                delay_ms = delay.as_millis() as u64,
                "Server error, retrying after delay"
            );
            tokio::time::sleep(delay).await;
            retry_count += 1;
            continue;
        }

        // EDGE-002: 4xx errors fail immediately
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        match read_limited_bytes(response, config.max_feed_bytes).await {
            Ok(bytes) => {
                tracing::debug!(feed = %url, bytes = bytes.len(), "Fetched feed");
                return Ok(bytes);
            }
            Err(FeedError::IncompleteResponse { expected, received }) => {
                // EDGE-005: Handle incomplete downloads with retry and exponential backoff
                if retry_count >= config.max_retries {
                    return Err(FeedError::IncompleteResponse { expected, received });
                }
                let delay = backoff(config, retry_count);
                tracing::debug!(
                    feed = %url,
                    expected = expected,
                    received = received,
                    attempt = retry_count + 1,
                    "Retrying incomplete download"
                );
                tokio::time::sleep(delay).await;
                retry_count += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff(config: &FetchConfig, retry_count: u32) -> Duration {
    config.retry_base_delay.saturating_mul(2u32.saturating_pow(retry_count))
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FeedError> {
    // Capture Content-Length for completeness check
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FeedError::TooLarge { limit });
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FeedError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FeedError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FeedError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
