//! Series + visual mode → the declarative view model handed to the renderer.

use serde::Serialize;

use crate::{
    models::{series::NormalizedSeries, slot::VisualMode},
    render::{RenderSettings, color::HexColor, labels::format_labels, price::is_positive},
};

/// Alpha of the fill right under the line; it fades to zero at the baseline.
const GRADIENT_TOP_ALPHA: f64 = 0.4;

/// One candlestick item, `x` in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandleItem {
    pub x: i64,
    pub o: f64,
    pub h: Option<f64>,
    pub l: Option<f64>,
    pub c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum SeriesData {
    /// Close prices, aligned 1:1 with `ViewModel::labels`.
    Line(Vec<f64>),
    Candlestick(Vec<CandleItem>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Line(items) => items.len(),
            SeriesData::Candlestick(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A vertical fill stop: `offset` 0 is the line, 1 the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

/// Everything the renderer needs to draw one chart. Built fresh per render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub mode: VisualMode,
    /// Category labels; empty in candlestick mode, whose axis is time-typed.
    pub labels: Vec<String>,
    pub series: SeriesData,
    pub line_color: HexColor,
    /// Empty in candlestick mode.
    pub gradient_stops: Vec<GradientStop>,
}

fn gradient(color: HexColor) -> Vec<GradientStop> {
    vec![
        GradientStop {
            offset: 0.0,
            color: color.rgba(GRADIENT_TOP_ALPHA),
        },
        GradientStop {
            offset: 1.0,
            color: color.rgba(0.0),
        },
    ]
}

/// Projects `series` for drawing in `mode`.
pub fn project(
    series: &NormalizedSeries,
    mode: VisualMode,
    settings: &RenderSettings,
) -> ViewModel {
    let line_color = settings.palette.for_direction(is_positive(series));
    let points = series.points();

    match mode {
        VisualMode::Line => ViewModel {
            mode,
            labels: format_labels(points, &settings.timezone),
            // every stored point is valid, so this keeps 1:1 alignment with the labels
            series: SeriesData::Line(points.iter().filter_map(|p| p.close).collect()),
            line_color,
            gradient_stops: gradient(line_color),
        },
        VisualMode::Candlestick => ViewModel {
            mode,
            labels: Vec::new(),
            series: SeriesData::Candlestick(
                points
                    .iter()
                    .filter_map(|p| {
                        Some(CandleItem {
                            x: p.time.saturating_mul(1000),
                            o: p.open?,
                            h: p.high,
                            l: p.low,
                            c: p.close?,
                        })
                    })
                    .collect(),
            ),
            line_color,
            gradient_stops: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::price_point::PricePoint, render::color::Palette};

    fn sample(current: f64, previous: f64) -> NormalizedSeries {
        NormalizedSeries::new(
            vec![
                PricePoint::new(3_600, Some(10.0), Some(11.0), Some(9.5), Some(10.5)),
                PricePoint::new(7_200, Some(10.5), None, None, Some(10.25)),
            ],
            Some(current),
            Some(previous),
            "Sample",
        )
    }

    #[test]
    fn line_mode_has_aligned_labels_and_closes() {
        let vm = project(&sample(10.25, 10.0), VisualMode::Line, &RenderSettings::default());
        assert_eq!(vm.labels, vec!["01:00".to_string(), "02:00".to_string()]);
        assert_eq!(vm.series, SeriesData::Line(vec![10.5, 10.25]));
        assert_eq!(vm.line_color, Palette::default().up);
        assert_eq!(vm.gradient_stops.len(), 2);
        assert_eq!(vm.gradient_stops[1].color, "rgba(46, 189, 133, 0)");
    }

    #[test]
    fn candlestick_mode_uses_millis_and_no_labels() {
        let vm = project(&sample(9.0, 10.0), VisualMode::Candlestick, &RenderSettings::default());
        assert!(vm.labels.is_empty());
        assert!(vm.gradient_stops.is_empty());
        assert_eq!(vm.line_color, Palette::default().down);
        assert_eq!(
            vm.series,
            SeriesData::Candlestick(vec![
                CandleItem {
                    x: 3_600_000,
                    o: 10.0,
                    h: Some(11.0),
                    l: Some(9.5),
                    c: 10.5
                },
                CandleItem {
                    x: 7_200_000,
                    o: 10.5,
                    h: None,
                    l: None,
                    c: 10.25
                },
            ])
        );
    }

    #[test]
    fn projection_is_repeatable() {
        let series = sample(10.0, 10.0);
        let settings = RenderSettings::default();
        for mode in [VisualMode::Line, VisualMode::Candlestick] {
            assert_eq!(project(&series, mode, &settings), project(&series, mode, &settings));
        }
    }

    #[test]
    fn absurd_timestamps_clamp_instead_of_overflowing() {
        let series = NormalizedSeries::new(
            vec![
                PricePoint::new(i64::MIN / 2, Some(1.0), None, None, Some(1.0)),
                PricePoint::new(i64::MAX / 2, Some(1.0), None, None, Some(1.0)),
            ],
            None,
            None,
            "Broken feed",
        );

        let vm = project(&series, VisualMode::Candlestick, &RenderSettings::default());
        match vm.series {
            SeriesData::Candlestick(items) => {
                assert_eq!(items[0].x, i64::MIN);
                assert_eq!(items[1].x, i64::MAX);
            }
            SeriesData::Line(_) => panic!("expected candlestick items"),
        }

        let line = project(&series, VisualMode::Line, &RenderSettings::default());
        assert_eq!(line.labels, vec![String::new(), String::new()]);
    }

    #[test]
    fn serializes_for_the_renderer() {
        let vm = project(&sample(10.25, 10.0), VisualMode::Line, &RenderSettings::default());
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["mode"], "line");
        assert_eq!(json["lineColor"], "#2ebd85");
        assert_eq!(json["series"]["kind"], "line");
        assert_eq!(json["series"]["items"][1], 10.25);
    }
}
