//! Request URL construction, including the optional CORS relay hop.

use reqwest::Url;

use crate::{
    models::fetch_params::FetchParams,
    providers::errors::{ProviderError, ProviderInitError},
};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const DEFAULT_PROXY_PARAM: &str = "url";

/// A relay that takes the real target URL as one URL-encoded query parameter,
/// e.g. `https://relay.example/raw?url=<encoded target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    url: Url,
    param: String,
}

/// Where chart requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEndpoint {
    base: Url,
    relay: Option<Relay>,
}

fn parse_url(raw: &str) -> Result<Url, ProviderInitError> {
    let url = Url::parse(raw).map_err(|e| ProviderInitError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ProviderInitError::InvalidUrl {
            url: raw.to_string(),
            message: "URL cannot carry a path".to_string(),
        });
    }
    Ok(url)
}

impl ChartEndpoint {
    /// Direct endpoint without a relay.
    pub fn direct(base_url: &str) -> Result<Self, ProviderInitError> {
        Ok(Self {
            base: parse_url(base_url)?,
            relay: None,
        })
    }

    /// Routes every request through `relay_url`, passing the target as `param`.
    pub fn with_relay(mut self, relay_url: &str, param: &str) -> Result<Self, ProviderInitError> {
        self.relay = Some(Relay {
            url: parse_url(relay_url)?,
            param: param.to_string(),
        });
        Ok(self)
    }

    /// The upstream URL for `params`, before any relay wrapping.
    pub fn target_url(&self, params: &FetchParams) -> Result<Url, ProviderError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::InvalidRequest(format!("base URL {} has no path", self.base))
            })?
            .pop_if_empty()
            .push(&params.symbol);
        url.query_pairs_mut()
            .append_pair("range", &params.range)
            .append_pair("interval", &params.interval);
        Ok(url)
    }

    /// The URL actually requested: the target itself, or the relay URL
    /// carrying the encoded target.
    pub fn request_url(&self, params: &FetchParams) -> Result<Url, ProviderError> {
        let target = self.target_url(params)?;
        match &self.relay {
            None => Ok(target),
            Some(relay) => {
                let mut url = relay.url.clone();
                url.query_pairs_mut().append_pair(&relay.param, target.as_str());
                Ok(url)
            }
        }
    }
}
