use tracing::error;

use crate::{
    models::slot::SlotId,
    sink::{ChartSink, RenderFrame},
};

/// Prints frames to stdout and error messages to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink {
    json: bool,
}

impl StdoutSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

/// One-line human readable summary of a frame.
pub fn summarize(frame: &RenderFrame) -> String {
    let mut line = format!(
        "[{}] {} ({}) {} {} points",
        frame.slot,
        frame.symbol,
        frame.display_name,
        frame.view.mode,
        frame.view.series.len()
    );
    if let Some(price) = &frame.price {
        line.push_str(&format!(
            " | {} {} ({})",
            price.price, price.change, price.percent
        ));
    }
    if let Some(last) = frame.view.labels.last() {
        line.push_str(&format!(" | last {last}"));
    }
    line
}

impl ChartSink for StdoutSink {
    fn render(&self, frame: &RenderFrame) {
        if !self.json {
            println!("{}", summarize(frame));
            return;
        }
        match serde_json::to_string(frame) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(slot = %frame.slot, error = %e, "failed to serialize frame"),
        }
    }

    fn report_error(&self, slot: SlotId, message: &str) {
        eprintln!("ERROR: [{slot}] {message}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        cache::CachedSeries,
        models::{
            fetch_params::FetchParams, price_point::PricePoint, series::NormalizedSeries,
            slot::VisualMode,
        },
        render::RenderSettings,
    };

    fn frame(mode: VisualMode, previous_close: Option<f64>) -> RenderFrame {
        let series = NormalizedSeries::new(
            vec![
                PricePoint::new(0, Some(1.0), Some(1.5), Some(0.5), Some(1.2)),
                PricePoint::new(300, Some(1.2), Some(1.4), Some(1.1), Some(1.3)),
            ],
            Some(101.0),
            previous_close,
            "Taiwan Semi".to_string(),
        );
        let cached = CachedSeries::new(FetchParams::new("2330.TW", "1d", "5m"), series);
        RenderFrame::build(SlotId::Search, &cached, mode, &RenderSettings::default())
    }

    #[test]
    fn summary_includes_price_and_last_label() {
        let line = summarize(&frame(VisualMode::Line, Some(100.0)));
        assert_eq!(
            line,
            "[search] 2330.TW (Taiwan Semi) line 2 points | 101.00 +1.00 (+1.00%) | last 00:05"
        );
    }

    #[test]
    fn summary_without_price_or_labels() {
        let line = summarize(&frame(VisualMode::Candlestick, None));
        assert_eq!(line, "[search] 2330.TW (Taiwan Semi) candlestick 2 points");
    }

    #[test]
    fn frames_serialize_to_json() {
        let json = serde_json::to_value(frame(VisualMode::Line, Some(100.0))).unwrap();
        assert_eq!(json["slot"], "search");
        assert_eq!(json["displayName"], "Taiwan Semi");
        assert_eq!(json["view"]["labels"][0], "00:00");
    }

    #[test]
    fn usable_as_shared_sink() {
        let sink: Arc<dyn ChartSink> = Arc::new(StdoutSink::new(false));
        sink.report_error(SlotId::Fixed(0), "boom");
    }
}
