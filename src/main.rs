use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use lexgate::agents::AgentId;
use lexgate::cli::{Cli, Command};
use lexgate::config::RuntimeConfig;
use lexgate::gateway::server::{GatewayState, start_server};
use lexgate::settings::Settings;
use lexgate::terminal;

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexgate=info,tower_http=warn"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Serve { bind } => {
            let settings = Settings::load()?;
            let mut config = RuntimeConfig::resolve(&settings)?;
            if let Some(bind) = bind {
                config.bind = bind;
            }

            tracing::info!(
                runtime = %config.runtime_url,
                model_fallback = config.model.is_some(),
                "Starting gateway"
            );

            let state = Arc::new(GatewayState::new(config.clone()));
            let bound = start_server(config.bind, state.clone()).await?;
            tracing::info!("Gateway listening on http://{bound}");

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for shutdown signal")?;
            if let Some(tx) = state.shutdown_tx.write().await.take() {
                let _ = tx.send(());
            }
            Ok(())
        }
        Command::Chat { gateway, agent } => {
            let agent = agent
                .as_deref()
                .map(AgentId::parse)
                .transpose()
                .context("unknown agent")?;
            terminal::run_chat(gateway, agent).await
        }
    }
}
