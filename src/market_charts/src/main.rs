use std::{error::Error, sync::Arc};

use clap::Parser;
use market_charts::{
    cli::{
        commands::{Cli, Commands},
        sink::StdoutSink,
    },
    config::DashboardConfig,
    orchestrator::{Orchestrator, OrchestratorOptions},
    providers::yahoo::YahooChartProvider,
};
use tokio::time::{self, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())?;

    let provider = Arc::new(YahooChartProvider::new(&config.upstream)?);
    let sink = Arc::new(StdoutSink::new(cli.json));
    let orchestrator = Orchestrator::new(provider, sink, OrchestratorOptions::from(&config));

    match &cli.command {
        Commands::Watch => {
            orchestrator.initialize(&config.slots).await;

            let mut ticker = time::interval(config.refresh.period());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately and initialize already fetched
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => orchestrator.refresh_all().await,
                    _ = tokio::signal::ctrl_c() => {
                        info!("interrupted, shutting down");
                        break;
                    }
                }
            }
        }
        Commands::Show { symbol, suffix, .. } => {
            orchestrator
                .search_with(symbol, suffix.as_deref(), cli.command.overrides())
                .await;
        }
    }

    Ok(())
}
