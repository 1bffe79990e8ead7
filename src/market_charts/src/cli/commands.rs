use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{models::slot::VisualMode, orchestrator::SlotUpdate};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (market_charts.toml). Built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print every render as JSON instead of a one-line summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw every fixed slot, then refresh them on the configured period until interrupted
    Watch,

    /// Look up one ticker in the search slot
    Show {
        /// Ticker code (e.g. "2330" or "AAPL"); codes containing '.' or starting with '^' are used as is
        #[arg(long)]
        symbol: String,

        /// Exchange suffix appended to bare codes (e.g. ".TW"); overrides search.default_suffix
        #[arg(long)]
        suffix: Option<String>,

        /// Range preset, e.g. 1d, 5d, 1mo, 1y
        #[arg(long)]
        range: Option<String>,

        /// Bar interval, e.g. 5m, 1h, 1d
        #[arg(long)]
        interval: Option<String>,

        /// line or candlestick
        #[arg(long)]
        mode: Option<VisualMode>,
    },
}

impl Commands {
    /// Range / interval / mode overrides carried by `show`.
    pub fn overrides(&self) -> SlotUpdate {
        match self {
            Commands::Watch => SlotUpdate::default(),
            Commands::Show {
                range,
                interval,
                mode,
                ..
            } => SlotUpdate {
                range: range.clone(),
                interval: interval.clone(),
                mode: *mode,
            },
        }
    }
}
