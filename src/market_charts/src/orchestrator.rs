//! Entry points driven by timers and user interaction.
//!
//! The [`Orchestrator`] owns every [`SlotState`] and is the only thing that
//! mutates them. Its operations never fail towards the caller: problems are
//! shown through [`ChartSink::report_error`] while the last good render stays
//! on screen.
//!
//! Operations may overlap (a refresh tick firing while a user-triggered fetch
//! is still in flight). Slot state sits behind an async mutex that is never
//! held across a network request. Each fetch is stamped with a generation
//! token, and a completing fetch whose token has been superseded is dropped,
//! so an old response can never overwrite newer state.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    cache::{CachedSeries, should_refetch},
    config::{DashboardConfig, SearchConfig},
    errors::Error,
    models::{
        fetch_params::FetchParams,
        series::NormalizedSeries,
        slot::{SlotDefinition, SlotId, SlotState, VisualMode},
        symbol::normalize_symbol,
    },
    providers::DataProvider,
    render::RenderSettings,
    requests::{FetchError, RetryPolicy, SeriesFetcher},
    sink::{ChartSink, RenderFrame},
};

/// A user-driven change to one slot. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotUpdate {
    pub range: Option<String>,
    pub interval: Option<String>,
    pub mode: Option<VisualMode>,
}

impl SlotUpdate {
    /// A range preset button: range and interval change together.
    pub fn preset(range: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            range: Some(range.into()),
            interval: Some(interval.into()),
            mode: None,
        }
    }

    /// A chart-type toggle.
    pub fn mode(mode: VisualMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    /// `current` with this update's range and interval applied.
    fn target(&self, current: &FetchParams) -> FetchParams {
        let mut target = current.clone();
        if let Some(range) = &self.range {
            target.range.clone_from(range);
        }
        if let Some(interval) = &self.interval {
            target.interval.clone_from(interval);
        }
        target
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorOptions {
    pub retry: RetryPolicy,
    pub render: RenderSettings,
    pub search: SearchConfig,
}

impl From<&DashboardConfig> for OrchestratorOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            retry: config.fetch.retry_policy(),
            render: config.display.render_settings(),
            search: config.search.clone(),
        }
    }
}

pub struct Orchestrator {
    fetcher: SeriesFetcher,
    sink: Arc<dyn ChartSink>,
    render: RenderSettings,
    search: SearchConfig,
    slots: Mutex<IndexMap<SlotId, SlotState>>,
    generations: AtomicU64,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        sink: Arc<dyn ChartSink>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            fetcher: SeriesFetcher::new(provider, options.retry),
            sink,
            render: options.render,
            search: options.search,
            slots: Mutex::new(IndexMap::new()),
            generations: AtomicU64::new(0),
        }
    }

    /// Snapshot of one slot's state.
    pub async fn slot(&self, id: SlotId) -> Option<SlotState> {
        self.slots.lock().await.get(&id).cloned()
    }

    /// Known slots in creation order.
    pub async fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.lock().await.keys().copied().collect()
    }

    /// Creates one fixed slot per definition and brings each on screen, one
    /// after another.
    ///
    /// Calling it again with the same definitions re-renders from cache
    /// without fetching.
    pub async fn initialize(&self, definitions: &[SlotDefinition]) {
        for (index, definition) in definitions.iter().enumerate() {
            let id = SlotId::Fixed(index);
            {
                let mut slots = self.slots.lock().await;
                slots.entry(id).or_insert_with(|| {
                    info!(slot = %id, params = %definition.params(), "creating slot");
                    SlotState::new(id, definition.params(), definition.mode)
                });
            }
            self.reconcile(id, |_| definition.params(), Some(definition.mode), true)
                .await;
        }
    }

    /// Re-fetches every fixed slot with its current params. Meant for the
    /// periodic refresh timer; safe to call while a previous refresh is still
    /// running.
    pub async fn refresh_all(&self) {
        let fixed: Vec<SlotId> = self
            .slots
            .lock()
            .await
            .keys()
            .copied()
            .filter(|id| matches!(id, SlotId::Fixed(_)))
            .collect();

        debug!(slots = fixed.len(), "refreshing fixed slots");
        for id in fixed {
            let issued = {
                let mut slots = self.slots.lock().await;
                slots.get_mut(&id).map(|slot| self.stamp(slot))
            };
            if let Some((params, generation)) = issued {
                self.fetch_and_apply(id, params, generation).await;
            }
        }
    }

    /// Applies a range / interval / mode change to `id`, fetching only when
    /// the cache no longer matches the requested params. Unknown slots are
    /// ignored.
    ///
    /// New params are committed to the slot only once their fetch succeeds,
    /// so after a failure the slot keeps describing the series on screen.
    pub async fn update_slot(&self, id: SlotId, update: SlotUpdate) {
        let selects_params = update.range.is_some() || update.interval.is_some();
        self.reconcile(id, |current| update.target(current), update.mode, selects_params)
            .await;
    }

    /// Moves `id` towards the params produced by `target`: re-renders from
    /// cache when they match, fetches otherwise.
    ///
    /// With `selects_params` set, a cache hit also supersedes any fetch still
    /// in flight for the slot.
    async fn reconcile(
        &self,
        id: SlotId,
        target: impl FnOnce(&FetchParams) -> FetchParams,
        mode: Option<VisualMode>,
        selects_params: bool,
    ) {
        let issued = {
            let mut slots = self.slots.lock().await;
            let Some(slot) = slots.get_mut(&id) else {
                debug!(slot = %id, "update for unknown slot ignored");
                return;
            };
            if let Some(mode) = mode {
                slot.mode = mode;
            }

            let params = target(&slot.params);
            if should_refetch(slot, &params) {
                slot.generation = self.next_generation();
                Some((params, slot.generation))
            } else {
                debug!(slot = %id, %params, "reusing cached series");
                if selects_params {
                    slot.generation = self.next_generation();
                }
                slot.params = params;
                self.render_slot(slot);
                None
            }
        };

        if let Some((params, generation)) = issued {
            self.fetch_and_apply(id, params, generation).await;
        }
    }

    /// Looks up a user-entered code in the search slot with the configured
    /// defaults.
    pub async fn search(&self, code: &str, suffix: Option<&str>) {
        self.search_with(code, suffix, SlotUpdate::default()).await
    }

    /// Like [`search`](Self::search) but with explicit range / interval / mode.
    ///
    /// The search slot is created by the first search that returns data and
    /// is re-pointed by later ones. A failed first search creates nothing.
    pub async fn search_with(&self, code: &str, suffix: Option<&str>, overrides: SlotUpdate) {
        let suffix = suffix.or(self.search.default_suffix.as_deref());
        let symbol = match normalize_symbol(code, suffix) {
            Ok(symbol) => symbol,
            Err(e) => {
                self.sink.report_error(SlotId::Search, &Error::from(e).to_string());
                return;
            }
        };

        let params = FetchParams::new(
            symbol,
            overrides.range.clone().unwrap_or_else(|| self.search.range.clone()),
            overrides
                .interval
                .clone()
                .unwrap_or_else(|| self.search.interval.clone()),
        );
        let generation = self.next_generation();

        {
            let mut slots = self.slots.lock().await;
            if let Some(slot) = slots.get_mut(&SlotId::Search) {
                if !should_refetch(slot, &params) {
                    slot.params = params;
                    if let Some(mode) = overrides.mode {
                        slot.mode = mode;
                    }
                    self.render_slot(slot);
                    return;
                }
                slot.generation = generation;
            }
        }

        let outcome = self.fetcher.fetch(&params).await;

        let mut slots = self.slots.lock().await;
        if slots
            .get(&SlotId::Search)
            .is_some_and(|slot| slot.generation > generation)
        {
            warn!(%params, generation, "discarding superseded search result");
            return;
        }

        match self.usable(&params, outcome) {
            Ok(series) => {
                let slot = slots.entry(SlotId::Search).or_insert_with(|| {
                    info!(%params, "creating search slot");
                    SlotState::new(SlotId::Search, params.clone(), self.search.mode)
                });
                if let Some(mode) = overrides.mode {
                    slot.mode = mode;
                }
                slot.params = params.clone();
                slot.generation = generation;
                slot.cached = Some(CachedSeries::new(params, series));
                self.render_slot(slot);
            }
            Err(e) => self.sink.report_error(SlotId::Search, &e.to_string()),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Marks a new fetch of the slot's committed params as its current one.
    fn stamp(&self, slot: &mut SlotState) -> (FetchParams, u64) {
        slot.generation = self.next_generation();
        (slot.params.clone(), slot.generation)
    }

    /// Empty series count as "no data": reported, and never cached.
    fn usable(
        &self,
        params: &FetchParams,
        outcome: Result<NormalizedSeries, FetchError>,
    ) -> Result<NormalizedSeries, Error> {
        match outcome {
            Ok(series) if series.is_empty() => Err(Error::NoData {
                symbol: params.symbol.clone(),
            }),
            Ok(series) => Ok(series),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_and_apply(&self, id: SlotId, params: FetchParams, generation: u64) {
        let outcome = self.fetcher.fetch(&params).await;

        let mut slots = self.slots.lock().await;
        let Some(slot) = slots.get_mut(&id) else {
            return;
        };
        if slot.generation > generation {
            warn!(
                slot = %id,
                %params,
                generation,
                current = slot.generation,
                "discarding stale fetch result"
            );
            return;
        }

        match self.usable(&params, outcome) {
            Ok(series) => {
                slot.params = params.clone();
                slot.cached = Some(CachedSeries::new(params, series));
                self.render_slot(slot);
            }
            Err(e) => {
                warn!(slot = %id, error = %e, "keeping previous render");
                self.sink.report_error(id, &e.to_string());
            }
        }
    }

    fn render_slot(&self, slot: &SlotState) {
        match &slot.cached {
            Some(cached) => {
                let frame = RenderFrame::build(slot.id, cached, slot.mode, &self.render);
                self.sink.render(&frame);
            }
            None => debug!(slot = %slot.id, "nothing cached to render"),
        }
    }
}
