use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";
pub const DEFAULT_OPS_CHANNEL: &str = "kalos-internal";
pub const DEFAULT_BOT_NAME: &str = "Blue Bot";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_PERSONA: &str = "You are Blue, a friendly AI assistant representing Kalos. You format notifications for customers through Slack.

Your personality:
- Warm and professional tone
- Enthusiastic about helping customers succeed
- Clear and concise communication
- Use emojis sparingly but effectively

Notification types:
- \"change\": Actions you completed on behalf of the customer (past tense, positive)
- \"learning\": Insights and analytics discovered about campaigns (exciting, data-focused)
- \"update\": Actions required from customer (clear call-to-action, include links prominently)

Format the notification data into a friendly Slack message. Return ONLY the formatted message text.";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub slack: Option<SlackConfig>,
    #[serde(default)]
    pub formatter: Option<FormatterConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServerConfig {
    pub bind: Option<String>,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SlackConfig {
    pub api_base: Option<String>,
    pub bot_name: Option<String>,
    pub ops_channel: Option<String>,
    pub bot_token_env: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FormatterConfig {
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub persona: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file. A missing file is not an error;
    /// the service runs on defaults with secrets taken from the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|server| server.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or("info")
    }

    pub fn slack_api_base(&self) -> &str {
        self.slack
            .as_ref()
            .and_then(|slack| slack.api_base.as_deref())
            .unwrap_or(DEFAULT_SLACK_API_BASE)
    }

    pub fn bot_name(&self) -> &str {
        self.slack
            .as_ref()
            .and_then(|slack| slack.bot_name.as_deref())
            .unwrap_or(DEFAULT_BOT_NAME)
    }

    pub fn ops_channel(&self) -> &str {
        self.slack
            .as_ref()
            .and_then(|slack| slack.ops_channel.as_deref())
            .unwrap_or(DEFAULT_OPS_CHANNEL)
    }

    pub fn bot_token_env(&self) -> &str {
        self.slack
            .as_ref()
            .and_then(|slack| slack.bot_token_env.as_deref())
            .unwrap_or("SLACK_BOT_TOKEN")
    }

    pub fn slack_request_timeout_secs(&self) -> u64 {
        self.slack
            .as_ref()
            .and_then(|slack| slack.request_timeout_secs)
            .unwrap_or(15)
    }

    pub fn formatter_model(&self) -> &str {
        self.formatter
            .as_ref()
            .and_then(|formatter| formatter.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    pub fn formatter_api_key_env(&self) -> &str {
        self.formatter
            .as_ref()
            .and_then(|formatter| formatter.api_key_env.as_deref())
            .unwrap_or("OPENAI_API_KEY")
    }

    pub fn formatter_base_url(&self) -> Option<&str> {
        self.formatter
            .as_ref()
            .and_then(|formatter| formatter.base_url.as_deref())
    }

    pub fn persona(&self) -> &str {
        self.formatter
            .as_ref()
            .and_then(|formatter| formatter.persona.as_deref())
            .unwrap_or(DEFAULT_PERSONA)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config: Config = toml::from_str("").expect("empty config");
        assert_eq!(config.bind(), "127.0.0.1:8080");
        assert_eq!(config.ops_channel(), "kalos-internal");
        assert_eq!(config.bot_token_env(), "SLACK_BOT_TOKEN");
        assert_eq!(config.formatter_model(), "gpt-4o-mini");
        assert!(config.persona().contains("Blue"));
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:9000"

            [slack]
            ops_channel = "escalations"
            bot_name = "Notifier"

            [formatter]
            model = "gpt-4o"
            "#,
        )
        .expect("config");
        assert_eq!(config.bind(), "0.0.0.0:9000");
        assert_eq!(config.ops_channel(), "escalations");
        assert_eq!(config.bot_name(), "Notifier");
        assert_eq!(config.formatter_model(), "gpt-4o");
    }
}
