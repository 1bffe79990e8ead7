//! The renderer boundary.
//!
//! The orchestrator pushes finished frames and user-facing error messages
//! into a [`ChartSink`]. What happens next (a canvas, a terminal, a
//! websocket) is the sink's business. A sink with nowhere to draw a slot
//! should simply ignore it.

use serde::Serialize;

use crate::{
    cache::CachedSeries,
    models::slot::{SlotId, VisualMode},
    render::{
        RenderSettings,
        options::{ChartOptions, build_chart_options},
        price::{PriceDisplay, price_display},
        projection::{ViewModel, project},
    },
};

/// One complete render of one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub slot: SlotId,
    pub symbol: String,
    pub display_name: String,
    pub last_updated_time: Option<i64>,
    pub view: ViewModel,
    pub options: ChartOptions,
    pub price: Option<PriceDisplay>,
}

impl RenderFrame {
    pub fn build(
        slot: SlotId,
        cached: &CachedSeries,
        mode: VisualMode,
        settings: &RenderSettings,
    ) -> Self {
        let series = &cached.series;
        Self {
            slot,
            symbol: cached.params.symbol.clone(),
            display_name: series.display_name.clone(),
            last_updated_time: series.last_updated_time(),
            view: project(series, mode, settings),
            options: build_chart_options(mode, &settings.palette),
            price: price_display(series),
        }
    }
}

pub trait ChartSink: Send + Sync {
    /// Draws `frame`, replacing whatever the slot showed before.
    fn render(&self, frame: &RenderFrame);

    /// Shows an inline message for `slot`. The previous render stays visible.
    fn report_error(&self, slot: SlotId, message: &str);
}
