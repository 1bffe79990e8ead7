//! Static chart configuration per visual mode.
//!
//! Each call returns a fresh value, so two charts never share (and mutate) one
//! options object.

use serde::Serialize;

use crate::{
    models::slot::VisualMode,
    render::color::{HexColor, Palette},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Discrete labels, one per point.
    Category,
    /// Millisecond timestamps.
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Candlestick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub kind: AxisKind,
    pub max_ticks: u8,
    pub grid: bool,
}

/// Per-item candle colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandleColors {
    pub up: HexColor,
    pub down: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub series_kind: SeriesKind,
    pub x_axis: AxisOptions,
    /// The y axis is always linear and positioned on the right.
    pub y_axis_right: bool,
    pub fill: bool,
    pub point_radius: f64,
    pub line_width: f64,
    pub tension: f64,
    pub candle_colors: Option<CandleColors>,
    pub show_legend: bool,
    pub animate: bool,
}

pub fn build_chart_options(mode: VisualMode, palette: &Palette) -> ChartOptions {
    match mode {
        VisualMode::Line => ChartOptions {
            series_kind: SeriesKind::Line,
            x_axis: AxisOptions {
                kind: AxisKind::Category,
                max_ticks: 6,
                grid: false,
            },
            y_axis_right: true,
            fill: true,
            point_radius: 0.0,
            line_width: 2.0,
            tension: 0.1,
            candle_colors: None,
            show_legend: false,
            animate: false,
        },
        VisualMode::Candlestick => ChartOptions {
            series_kind: SeriesKind::Candlestick,
            x_axis: AxisOptions {
                kind: AxisKind::Time,
                max_ticks: 6,
                grid: false,
            },
            y_axis_right: true,
            fill: false,
            point_radius: 0.0,
            line_width: 1.0,
            tension: 0.0,
            candle_colors: Some(CandleColors {
                up: palette.up,
                down: palette.down,
            }),
            show_legend: false,
            animate: false,
        },
    }
}
