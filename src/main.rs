use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use bluebot::config::Config;
use bluebot::generation::TextGenerator;
use bluebot::generation::openai::OpenAiGenerator;
use bluebot::notifications::dispatcher::Dispatcher;
use bluebot::notifications::escalation::EscalationNotifier;
use bluebot::notifications::render::MessageRenderer;
use bluebot::server::app::{bind_address, build_router};
use bluebot::server::state::AppState;
use bluebot::slack::{ChatDelivery, SlackClient};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("BLUEBOT_CONFIG").unwrap_or_else(|_| "bluebot.toml".to_string());
    let config = Config::load(&config_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level().to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bot_token = std::env::var(config.bot_token_env()).with_context(|| {
        format!(
            "missing slack bot token in env '{}'",
            config.bot_token_env()
        )
    })?;
    let slack: Arc<dyn ChatDelivery> = Arc::new(SlackClient::new(
        config.slack_api_base(),
        bot_token,
        config.bot_name().to_string(),
        Duration::from_secs(config.slack_request_timeout_secs()),
    )?);

    let generator = OpenAiGenerator::from_env(
        config.formatter_api_key_env(),
        config.formatter_base_url(),
        config.formatter_model(),
        config.persona(),
    );
    if generator.is_none() {
        tracing::warn!(
            api_key_env = config.formatter_api_key_env(),
            "no formatter API key configured, rendering with templates only"
        );
    }
    let generator = generator.map(|g| Arc::new(g) as Arc<dyn TextGenerator>);

    let renderer = MessageRenderer::new(generator);
    let escalation = EscalationNotifier::new(Arc::clone(&slack), config.ops_channel().to_string());
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&slack), renderer, escalation));

    let state = AppState {
        dispatcher,
        delivery: slack,
        server_config: config.server.clone(),
    };

    let addr = bind_address(config.bind());
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "bluebot listening");
    axum::serve(listener, app)
        .await
        .context("server exited with error")?;

    Ok(())
}
