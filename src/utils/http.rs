// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::SiteConfig;

/// Source of raw listing-page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its body as text.
    ///
    /// Transport errors, timeouts and non-2xx statuses are all errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &SiteConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// `PageFetcher` backed by reqwest.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("unexpected status {status}")));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_defaults() {
        assert!(create_async_client(&SiteConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_error() {
        let mut config = SiteConfig::default();
        config.timeout_secs = 2;
        let fetcher = HttpFetcher::new(&config).unwrap();
        // Port 9 on loopback is the discard service and is normally closed.
        let result = fetcher.fetch("http://127.0.0.1:9/exposiciones").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fetch_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let fetcher = HttpFetcher::new(&SiteConfig::default()).unwrap();
        let url = format!("http://{addr}/exposiciones");
        let result = fetcher.fetch(&url).await;
        server.await.unwrap();

        match result {
            Err(AppError::Fetch { url: failed, message }) => {
                assert_eq!(failed, url);
                assert!(message.contains("503"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
