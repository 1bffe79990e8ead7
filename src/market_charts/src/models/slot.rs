//! Identity and per-chart state of the tracked chart slots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cache::CachedSeries, models::fetch_params::FetchParams};

/// Which chart a state or render belongs to.
///
/// Resolved by the caller at the UI boundary; the core never infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    /// One of the configured index charts, by position in the configuration.
    Fixed(usize),
    /// The ad-hoc chart driven by the symbol search box.
    Search,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Fixed(index) => write!(f, "fixed-{index}"),
            SlotId::Search => f.write_str("search"),
        }
    }
}

/// How a slot's series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    #[default]
    Line,
    Candlestick,
}

#[derive(Debug, Error)]
#[error("unknown chart mode {0:?} (expected \"line\" or \"candlestick\")")]
pub struct VisualModeParseError(String);

impl FromStr for VisualMode {
    type Err = VisualModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(VisualMode::Line),
            "candlestick" | "candle" => Ok(VisualMode::Candlestick),
            other => Err(VisualModeParseError(other.to_string())),
        }
    }
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisualMode::Line => "line",
            VisualMode::Candlestick => "candlestick",
        })
    }
}

/// Static description of one fixed chart, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDefinition {
    pub symbol: String,
    pub range: String,
    pub interval: String,
    #[serde(default)]
    pub mode: VisualMode,
}

impl SlotDefinition {
    pub fn params(&self) -> FetchParams {
        FetchParams::new(&self.symbol, &self.range, &self.interval)
    }
}

/// Everything the orchestrator tracks for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotState {
    pub id: SlotId,
    /// Params of the series on screen, or of the first pending fetch while
    /// nothing is cached. Equal to `cached.params` whenever a cache exists.
    pub params: FetchParams,
    /// Last successful series together with the params that produced it.
    pub cached: Option<CachedSeries>,
    pub mode: VisualMode,
    /// Token of the most recently issued fetch; older completions are discarded.
    pub generation: u64,
}

impl SlotState {
    pub fn new(id: SlotId, params: FetchParams, mode: VisualMode) -> Self {
        Self {
            id,
            params,
            cached: None,
            mode,
            generation: 0,
        }
    }
}
