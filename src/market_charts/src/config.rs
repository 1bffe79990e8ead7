//! Dashboard configuration: TOML file plus environment overrides.
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below, so running without a file gives a working three-index
//! dashboard.
//!
//! ```toml
//! [upstream]
//! proxy_url = "https://relay.example/raw"
//!
//! [display]
//! timezone = "Asia/Taipei"
//!
//! [[slots]]
//! symbol = "^TWII"
//! range = "1d"
//! interval = "5m"
//! mode = "candlestick"
//! ```
//!
//! Environment overrides (applied after the file):
//! - `MARKET_CHARTS_PROXY_URL` replaces `upstream.proxy_url`
//! - `MARKET_CHARTS_TIMEZONE` replaces `display.timezone`

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono_tz::Tz;
use serde::Deserialize;
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::error;

use crate::{
    models::slot::{SlotDefinition, VisualMode},
    providers::yahoo::endpoint::{DEFAULT_BASE_URL, DEFAULT_PROXY_PARAM},
    render::{
        RenderSettings,
        color::{DOWN_COLOR, HexColor, Palette, UP_COLOR},
    },
    requests::fetcher::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, RetryPolicy},
};

pub const PROXY_URL_ENV: &str = "MARKET_CHARTS_PROXY_URL";
pub const TIMEZONE_ENV: &str = "MARKET_CHARTS_TIMEZONE";

/// Errors related to loading the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown time zone {0:?}")]
    Timezone(String),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// CORS relay; requests go straight to `base_url` when unset.
    pub proxy_url: Option<String>,
    /// Query parameter of the relay that carries the encoded target URL.
    pub proxy_param: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy_url: None,
            proxy_param: DEFAULT_PROXY_PARAM.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
        }
    }
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub period_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { period_secs: 60 }
    }
}

impl RefreshConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub timezone: Tz,
    pub up_color: HexColor,
    pub down_color: HexColor,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            up_color: UP_COLOR,
            down_color: DOWN_COLOR,
        }
    }
}

impl DisplayConfig {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            palette: Palette {
                up: self.up_color,
                down: self.down_color,
            },
            timezone: self.timezone,
        }
    }
}

/// Defaults for the ad-hoc search chart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Exchange suffix appended to bare codes, e.g. `".TW"`.
    pub default_suffix: Option<String>,
    pub range: String,
    pub interval: String,
    pub mode: VisualMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_suffix: None,
            range: "1d".to_string(),
            interval: "5m".to_string(),
            mode: VisualMode::Line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub upstream: UpstreamConfig,
    pub fetch: FetchConfig,
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
    pub search: SearchConfig,
    /// Fixed index charts, in display order.
    pub slots: Vec<SlotDefinition>,
}

fn default_slots() -> Vec<SlotDefinition> {
    ["^GSPC", "^DJI", "^IXIC"]
        .into_iter()
        .map(|symbol| SlotDefinition {
            symbol: symbol.to_string(),
            range: "1d".to_string(),
            interval: "5m".to_string(),
            mode: VisualMode::Line,
        })
        .collect()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            fetch: FetchConfig::default(),
            refresh: RefreshConfig::default(),
            display: DisplayConfig::default(),
            search: SearchConfig::default(),
            slots: default_slots(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a TOML document. Environment overrides are not applied.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` (or the defaults when `None`) and applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => read_config(path)?,
            None => DashboardConfig::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(proxy) = get_optional_env_var(PROXY_URL_ENV) {
            self.upstream.proxy_url = Some(proxy);
        }
        if let Some(tz) = get_optional_env_var(TIMEZONE_ENV) {
            self.display.timezone = tz.parse().map_err(|_| ConfigError::Timezone(tz))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.period_secs == 0 {
            return Err(ConfigError::Invalid("refresh.period_secs must be > 0".into()));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Invalid("upstream.timeout_secs must be > 0".into()));
        }
        if self.upstream.proxy_param.trim().is_empty() {
            return Err(ConfigError::Invalid("upstream.proxy_param must not be empty".into()));
        }
        if self.search.range.trim().is_empty() || self.search.interval.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "search.range and search.interval must not be empty".into(),
            ));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if [&slot.symbol, &slot.range, &slot.interval]
                .iter()
                .any(|field| field.trim().is_empty())
            {
                return Err(ConfigError::Invalid(format!(
                    "slots[{i}]: symbol, range and interval must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Reads and parses a config file, logging the cause on failure.
pub fn read_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), error = %source, "failed to read config file");
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    DashboardConfig::from_toml_str(&content).inspect_err(|e| {
        error!(path = %path.display(), error = %e, "failed to parse config file");
    })
}
