#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use market_charts::{
    models::{
        fetch_params::FetchParams, price_point::PricePoint, series::NormalizedSeries, slot::SlotId,
    },
    providers::{DataProvider, errors::ProviderError},
    sink::{ChartSink, RenderFrame},
};

/// What the scripted provider answers for one request.
#[derive(Debug, Clone)]
pub enum Step {
    Series(NormalizedSeries),
    Status(u16),
    Shape(&'static str),
    Delayed(Duration, Box<Step>),
}

impl Step {
    pub fn delayed(self, millis: u64) -> Self {
        Step::Delayed(Duration::from_millis(millis), Box::new(self))
    }
}

/// Answers requests from per-params queues. The last step of a queue repeats.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<FetchParams, VecDeque<Step>>>,
    calls: Mutex<Vec<FetchParams>>,
    count: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, params: FetchParams, steps: impl IntoIterator<Item = Step>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(params, steps.into_iter().collect());
    }

    pub fn call_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<FetchParams> {
        self.calls.lock().unwrap().clone()
    }

    fn next_step(&self, params: &FetchParams) -> Step {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(params) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Step::Shape("no script for these params"),
        }
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_series(&self, params: &FetchParams) -> Result<NormalizedSeries, ProviderError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(params.clone());

        let mut step = self.next_step(params);
        loop {
            match step {
                Step::Series(series) => return Ok(series),
                Step::Status(status) => {
                    return Err(ProviderError::Status {
                        status,
                        body: "scripted failure".to_string(),
                    });
                }
                Step::Shape(message) => return Err(ProviderError::Shape(message.to_string())),
                Step::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    step = *inner;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Render(RenderFrame),
    Error { slot: SlotId, message: String },
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Render(frame) => Some(frame),
                SinkEvent::Error { .. } => None,
            })
            .collect()
    }

    pub fn frames_for(&self, slot: SlotId) -> Vec<RenderFrame> {
        self.frames()
            .into_iter()
            .filter(|frame| frame.slot == slot)
            .collect()
    }

    pub fn errors(&self) -> Vec<(SlotId, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Error { slot, message } => Some((slot, message)),
                SinkEvent::Render(_) => None,
            })
            .collect()
    }
}

impl ChartSink for RecordingSink {
    fn render(&self, frame: &RenderFrame) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Render(frame.clone()));
    }

    fn report_error(&self, slot: SlotId, message: &str) {
        self.events.lock().unwrap().push(SinkEvent::Error {
            slot,
            message: message.to_string(),
        });
    }
}

/// `count` valid five-minute points starting at `start`, closing at `base + i`.
pub fn series(name: &str, start: i64, count: usize, base: f64) -> NormalizedSeries {
    let points = (0..count).map(|i| {
        let close = base + i as f64;
        PricePoint::new(
            start + 300 * i as i64,
            Some(close - 0.5),
            Some(close + 1.0),
            Some(close - 1.0),
            Some(close),
        )
    });
    NormalizedSeries::new(points, Some(base + count as f64), Some(base), name)
}

pub fn empty_series(name: &str) -> NormalizedSeries {
    NormalizedSeries::new(Vec::new(), None, None, name)
}

pub fn params(symbol: &str, range: &str, interval: &str) -> FetchParams {
    FetchParams::new(symbol, range, interval)
}
