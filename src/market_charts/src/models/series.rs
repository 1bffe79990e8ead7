//! The fetcher's canonical output: one symbol's cleaned price history.

use crate::models::price_point::PricePoint;

/// A symbol's price history plus the quote metadata shown next to the chart.
///
/// Construction drops every invalid [`PricePoint`] and orders the remaining
/// points by time. The point list cannot be mutated afterwards, so every
/// consumer (label bucketing, projection) can rely on ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    points: Vec<PricePoint>,
    /// Latest traded price reported by the upstream.
    pub current_price: Option<f64>,
    /// Close of the session preceding the charted range.
    pub previous_close: Option<f64>,
    /// Human-readable instrument name, falling back to the symbol.
    pub display_name: String,
    last_updated_time: Option<i64>,
}

impl NormalizedSeries {
    pub fn new(
        points: impl IntoIterator<Item = PricePoint>,
        current_price: Option<f64>,
        previous_close: Option<f64>,
        display_name: impl Into<String>,
    ) -> Self {
        let mut points: Vec<PricePoint> = points.into_iter().filter(PricePoint::is_valid).collect();
        // Upstream data is already ascending; the stable sort keeps it untouched in that case.
        points.sort_by_key(|p| p.time);
        let last_updated_time = points.last().map(|p| p.time);

        Self {
            points,
            current_price,
            previous_close,
            display_name: display_name.into(),
            last_updated_time,
        }
    }

    /// Valid points in ascending time order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// An empty series is a legitimate upstream answer ("no trades in range"),
    /// not a fetch failure. Callers decide how to present it.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time of the last valid point, `None` for an empty series.
    pub fn last_updated_time(&self) -> Option<i64> {
        self.last_updated_time
    }

    /// Seconds between the first and last point; zero with fewer than two points.
    pub fn span_secs(&self) -> i64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.time.saturating_sub(first.time),
            _ => 0,
        }
    }
}
