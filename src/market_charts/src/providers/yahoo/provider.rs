use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    config::UpstreamConfig,
    models::{fetch_params::FetchParams, series::NormalizedSeries},
    providers::{
        DataProvider,
        errors::{ProviderError, ProviderInitError},
        yahoo::{endpoint::ChartEndpoint, response::parse_chart},
    },
};

/// The upstream rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) market-charts/0.1";

/// Error bodies are echoed into messages; keep them short.
const MAX_ERROR_BODY: usize = 256;

pub struct YahooChartProvider {
    client: Client,
    endpoint: ChartEndpoint,
}

impl YahooChartProvider {
    /// Creates a provider from the `[upstream]` configuration section.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProviderInitError> {
        let mut endpoint = ChartEndpoint::direct(&config.base_url)?;
        if let Some(proxy_url) = &config.proxy_url {
            endpoint = endpoint.with_relay(proxy_url, &config.proxy_param)?;
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &ChartEndpoint {
        &self.endpoint
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_series(&self, params: &FetchParams) -> Result<NormalizedSeries, ProviderError> {
        let url = self.endpoint.request_url(params)?;
        debug!(%params, %url, "requesting chart");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        parse_chart(&body, &params.symbol)
    }
}
