use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::slack::{ChatDelivery, DeliveryError};

const CHANNEL_NOT_FOUND: &str = "channel_not_found";

#[derive(Debug, Clone, Deserialize)]
struct SlackChatMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SlackAuthTestResponse {
    ok: bool,
}

/// Thin client over the Slack Web API; one post per call, no retries.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    bot_name: String,
}

impl SlackClient {
    pub fn new(
        api_base: &str,
        bot_token: String,
        bot_name: String,
        request_timeout: Duration,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .context("failed to create slack http client")?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.trim().to_string(),
            bot_name,
        })
    }
}

#[async_trait]
impl ChatDelivery for SlackClient {
    async fn post_message(&self, channel: &str, text: &str) -> Result<String, DeliveryError> {
        let payload = json!({
            "channel": channel,
            "text": text,
            "username": self.bot_name,
        });

        let response = self
            .http
            .post(format!("{}/chat.postMessage", self.api_base))
            .bearer_auth(&self.bot_token)
            .json(&payload)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Api {
                code: format!("http_{}", status.as_u16()),
            });
        }

        let body: SlackChatMessageResponse =
            response
                .json()
                .await
                .map_err(|err| DeliveryError::Transport {
                    message: format!("failed to decode chat.postMessage response: {err}"),
                })?;

        if !body.ok {
            let code = body.error.unwrap_or_else(|| "unknown_error".to_string());
            if code == CHANNEL_NOT_FOUND {
                return Err(DeliveryError::ChannelNotFound {
                    channel: channel.to_string(),
                });
            }
            return Err(DeliveryError::Api { code });
        }

        body.ts.ok_or_else(|| DeliveryError::Unexpected {
            message: "chat.postMessage response missing ts".to_string(),
        })
    }

    async fn test_auth(&self) -> bool {
        let response = self
            .http
            .post(format!("{}/auth.test", self.api_base))
            .bearer_auth(&self.bot_token)
            .send()
            .await;
        match response {
            Ok(response) if response.status().is_success() => response
                .json::<SlackAuthTestResponse>()
                .await
                .map(|body| body.ok)
                .unwrap_or(false),
            _ => false,
        }
    }
}
