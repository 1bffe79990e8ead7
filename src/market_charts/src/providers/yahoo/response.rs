//! Wire format of the chart endpoint and its conversion to [`NormalizedSeries`].
//!
//! Only the fields the dashboard reads are modelled. Everything else in the
//! payload is ignored.

use serde::Deserialize;

use crate::{
    models::{price_point::PricePoint, series::NormalizedSeries},
    providers::errors::ProviderError,
};

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartApiError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    /// Absent when the requested range contains no trades.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Parallel OHLC arrays, index-aligned with `ChartResult::timestamp`.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

impl ChartResult {
    /// Pairs timestamps with quotes positionally and drops unusable points.
    ///
    /// A quote array shorter than `timestamp` yields missing values for the
    /// tail, which then fail validation like any other `null`.
    pub fn into_series(self, fallback_name: &str) -> Result<NormalizedSeries, ProviderError> {
        let quote = self
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Shape("missing indicators.quote[0]".to_string()))?;

        let points = self
            .timestamp
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, time)| {
                PricePoint::new(
                    time,
                    at(&quote.open, i),
                    at(&quote.high, i),
                    at(&quote.low, i),
                    at(&quote.close, i),
                )
            });

        let meta = self.meta;
        let display_name = meta
            .short_name
            .or(meta.long_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        Ok(NormalizedSeries::new(
            points,
            meta.regular_market_price,
            meta.chart_previous_close,
            display_name,
        ))
    }
}

/// Parses a raw chart body for `symbol`.
///
/// Every deviation from the expected shape becomes [`ProviderError::Shape`].
pub fn parse_chart(body: &str, symbol: &str) -> Result<NormalizedSeries, ProviderError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| ProviderError::Shape(format!("invalid chart JSON: {e}")))?;

    let first = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next());

    match first {
        Some(result) => result.into_series(symbol),
        None => {
            let reason = envelope
                .chart
                .error
                .map(|err| match (err.code, err.description) {
                    (Some(code), Some(desc)) => format!("{code}: {desc}"),
                    (None, Some(desc)) => desc,
                    (Some(code), None) => code,
                    (None, None) => "unspecified upstream error".to_string(),
                })
                .unwrap_or_else(|| "missing chart.result[0]".to_string());
            Err(ProviderError::Shape(reason))
        }
    }
}
