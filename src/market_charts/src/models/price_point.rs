//! A single OHLC sample as delivered by the chart endpoint.

use serde::{Deserialize, Serialize};

/// One time bucket of price data.
///
/// Every price field may be absent: the upstream fills gaps (halted trading,
/// the still-open current bucket) with `null`. Only points that carry both an
/// open and a close are considered usable, see [`PricePoint::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Bucket start, in seconds since the UNIX epoch (UTC).
    pub time: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl PricePoint {
    pub fn new(
        time: i64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// A point is usable only when both `open` and `close` are present.
    pub fn is_valid(&self) -> bool {
        self.open.is_some() && self.close.is_some()
    }
}
