//! Axis labels for line charts.
//!
//! Granularity is picked from the span between the first and last point
//! alone. This is a display heuristic with fixed thresholds, not a trading
//! calendar.

use chrono::{DateTime, TimeZone};

use crate::models::price_point::PricePoint;

/// Spans strictly above this (≈365 days) are labelled `YYYY/MM`.
pub const YEAR_SPAN_SECS: i64 = 31_536_000;
/// Spans strictly above this (2 days) are labelled `MM/DD`.
pub const MULTI_DAY_SPAN_SECS: i64 = 172_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelGranularity {
    YearMonth,
    MonthDay,
    HourMinute,
}

impl LabelGranularity {
    /// First matching rule wins; both thresholds are strict.
    pub fn for_span(span_secs: i64) -> Self {
        if span_secs > YEAR_SPAN_SECS {
            LabelGranularity::YearMonth
        } else if span_secs > MULTI_DAY_SPAN_SECS {
            LabelGranularity::MonthDay
        } else {
            LabelGranularity::HourMinute
        }
    }

    /// Granularity for an ascending point sequence. Fewer than two points
    /// always get the finest granularity.
    pub fn for_points(points: &[PricePoint]) -> Self {
        match points {
            [first, .., last] => Self::for_span(last.time.saturating_sub(first.time)),
            _ => LabelGranularity::HourMinute,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            LabelGranularity::YearMonth => "%Y/%m",
            LabelGranularity::MonthDay => "%m/%d",
            LabelGranularity::HourMinute => "%H:%M",
        }
    }
}

/// Renders `secs` in the `tz` wall clock. Out-of-range timestamps yield an
/// empty label rather than an error.
pub fn format_timestamp<Z: TimeZone>(secs: i64, granularity: LabelGranularity, tz: &Z) -> String
where
    Z::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(tz).format(granularity.pattern()).to_string())
        .unwrap_or_default()
}

/// One label per point, all at the granularity implied by the series span.
pub fn format_labels<Z: TimeZone>(points: &[PricePoint], tz: &Z) -> Vec<String>
where
    Z::Offset: std::fmt::Display,
{
    let granularity = LabelGranularity::for_points(points);
    points
        .iter()
        .map(|p| format_timestamp(p.time, granularity, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const DAY: i64 = 86_400;

    fn points_at(times: &[i64]) -> Vec<PricePoint> {
        times
            .iter()
            .map(|&t| PricePoint::new(t, Some(1.0), Some(1.0), Some(1.0), Some(1.0)))
            .collect()
    }

    fn matches_shape(label: &str, shape: &str) -> bool {
        label.len() == shape.len()
            && label.chars().zip(shape.chars()).all(|(c, s)| match s {
                'd' => c.is_ascii_digit(),
                other => c == other,
            })
    }

    #[test]
    fn extreme_spans_do_not_overflow() {
        let points = points_at(&[i64::MIN, i64::MAX]);
        assert_eq!(LabelGranularity::for_points(&points), LabelGranularity::YearMonth);
        assert_eq!(format_labels(&points, &Utc), vec![String::new(), String::new()]);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(LabelGranularity::for_span(YEAR_SPAN_SECS), LabelGranularity::MonthDay);
        assert_eq!(LabelGranularity::for_span(YEAR_SPAN_SECS + 1), LabelGranularity::YearMonth);
        assert_eq!(
            LabelGranularity::for_span(MULTI_DAY_SPAN_SECS),
            LabelGranularity::HourMinute
        );
        assert_eq!(
            LabelGranularity::for_span(MULTI_DAY_SPAN_SECS + 1),
            LabelGranularity::MonthDay
        );
    }

    #[test]
    fn four_hundred_days_use_year_month() {
        let start = 1_700_000_000;
        let labels = format_labels(
            &points_at(&[start, start + 200 * DAY, start + 400 * DAY]),
            &Utc,
        );
        assert!(labels.iter().all(|l| matches_shape(l, "dddd/dd")), "{labels:?}");
    }

    #[test]
    fn three_days_use_month_day() {
        let start = 1_700_000_000;
        let labels = format_labels(&points_at(&[start, start + DAY, start + 3 * DAY]), &Utc);
        assert!(labels.iter().all(|l| matches_shape(l, "dd/dd")), "{labels:?}");
    }

    #[test]
    fn single_point_at_epoch_is_midnight() {
        assert_eq!(format_labels(&points_at(&[0]), &Utc), vec!["00:00".to_string()]);
    }

    #[test]
    fn empty_input_gives_no_labels() {
        assert!(format_labels(&[], &Utc).is_empty());
    }

    #[test]
    fn exact_boundaries_fall_to_finer_granularity() {
        let year = format_labels(&points_at(&[0, YEAR_SPAN_SECS]), &Utc);
        assert_eq!(year, vec!["01/01".to_string(), "01/01".to_string()]);

        let two_days = format_labels(&points_at(&[0, MULTI_DAY_SPAN_SECS]), &Utc);
        assert_eq!(two_days, vec!["00:00".to_string(), "00:00".to_string()]);
    }

    #[test]
    fn labels_follow_the_configured_wall_clock() {
        let taipei: chrono_tz::Tz = "Asia/Taipei".parse().unwrap();
        assert_eq!(format_labels(&points_at(&[0]), &taipei), vec!["08:00".to_string()]);
    }
}
