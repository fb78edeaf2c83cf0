// Chat-completions HTTP client
// Author: kelexine (https://github.com/kelexine)

use super::{CompletionUpstream, RawReply};
use crate::config::UpstreamConfig;
use crate::error::{RelayError, Result};
use crate::models::CompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// One instance is shared by every request so connections are pooled.
/// Non-success statuses are returned as data, not errors: deciding what a
/// failed candidate means is the sequencer's job.
pub struct HttpUpstream {
    http_client: Client,
    api_url: String,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls();

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created upstream HTTP client for {}", config.api_url);

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl CompletionUpstream for HttpUpstream {
    async fn send(&self, credential: &str, request: &CompletionRequest) -> Result<RawReply> {
        debug!("POST {} model={}", self.api_url, request.model);

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(credential)
            .json(request)
            .send()
            .await?;

        // A status was received, so a failed body read still belongs to that status.
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    "Reading body from {} failed after HTTP {}: {}",
                    request.model, status, e
                );
                e.to_string()
            }
        };

        Ok(RawReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletionMessage, MessageRole};
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "org/model".to_string(),
            messages: vec![CompletionMessage {
                role: MessageRole::User,
                content: "hello".to_string(),
            }],
            temperature: 0.4,
            max_tokens: 250,
        }
    }

    fn config_for(url: String) -> UpstreamConfig {
        UpstreamConfig {
            api_url: url,
            ..UpstreamConfig::default()
        }
    }

    #[tokio::test]
    async fn test_send_posts_bearer_and_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "model": "org/model",
                "temperature": 0.4,
                "max_tokens": 250,
            })))
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HttpUpstream::new(&config_for(format!("{}/v1/chat/completions", server.url()))).unwrap();
        let reply = client.send("secret-token", &request()).await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, r#"{"choices":[]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_returned_as_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(404)
            .with_body("model not found")
            .create_async()
            .await;

        let client = HttpUpstream::new(&config_for(format!("{}/v1/chat/completions", server.url()))).unwrap();
        let reply = client.send("t", &request()).await.unwrap();

        assert_eq!(reply.status, 404);
        assert_eq!(reply.body, "model not found");
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_received_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Drain the whole request so closing the socket does not reset it.
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = HttpUpstream::new(&config_for(format!("http://{}/v1/chat/completions", addr))).unwrap();
        let reply = client.send("t", &request()).await.unwrap();

        assert_eq!(reply.status, 502);
        assert!(!reply.is_success());
        assert!(!reply.body.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = HttpUpstream::new(&config_for("http://127.0.0.1:9/v1/chat/completions".to_string())).unwrap();
        let err = client.send("t", &request()).await.unwrap_err();
        assert!(matches!(err, RelayError::Http(_)));
    }
}
