//! The price / change readout shown next to each chart.

use serde::Serialize;

use crate::models::series::NormalizedSeries;

/// `current >= previous_close`, non-strict so an unchanged price reads as up.
///
/// With either price missing there is nothing to compare and the series is
/// shown as up.
pub fn is_positive(series: &NormalizedSeries) -> bool {
    match (series.current_price, series.previous_close) {
        (Some(current), Some(previous)) => current >= previous,
        _ => true,
    }
}

/// Pre-formatted strings for the price readout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub price: String,
    pub change: String,
    pub percent: String,
    pub is_positive: bool,
}

/// Two decimals, with a `+` on every non-negative value.
///
/// Non-finite inputs come out as `+inf`, `-inf` or `NaN`.
pub fn format_signed(value: f64) -> String {
    // fold -0.0 into 0.0 so it prints as +0.00
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// Builds the readout, or `None` when the upstream supplied no current price
/// or no previous close.
///
/// A zero previous close is not special-cased: the percentage becomes
/// infinite or NaN and is displayed as such.
pub fn price_display(series: &NormalizedSeries) -> Option<PriceDisplay> {
    let current = series.current_price?;
    let previous = series.previous_close?;

    let diff = current - previous;
    let percent = diff / previous * 100.0;

    Some(PriceDisplay {
        price: format!("{current:.2}"),
        change: format_signed(diff),
        percent: format!("{}%", format_signed(percent)),
        is_positive: current >= previous,
    })
}
