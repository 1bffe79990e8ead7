//! Per-slot series cache and the fetch-vs-reuse decision.
//!
//! A cached series is always stored together with the [`FetchParams`] that
//! produced it, and both are swapped as one value. Readers therefore never see
//! a series paired with the wrong params. Failed fetches never touch the
//! cache: the last good series keeps rendering.

use std::sync::Arc;

use crate::models::{fetch_params::FetchParams, series::NormalizedSeries, slot::SlotState};

/// A successfully fetched series and the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSeries {
    pub params: FetchParams,
    pub series: Arc<NormalizedSeries>,
}

impl CachedSeries {
    pub fn new(params: FetchParams, series: NormalizedSeries) -> Self {
        Self {
            params,
            series: Arc::new(series),
        }
    }

    pub fn matches(&self, params: &FetchParams) -> bool {
        self.params == *params
    }
}

/// Returns `true` when `slot` has to go to the network to satisfy `new_params`.
///
/// That is the case when nothing is cached yet or the cached series was
/// produced by different params. A chart-type toggle leaves the params alone
/// and so always reuses the cache.
pub fn should_refetch(slot: &SlotState, new_params: &FetchParams) -> bool {
    match &slot.cached {
        Some(cached) => !cached.matches(new_params),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::{SlotId, VisualMode};
    use proptest::prelude::*;

    fn slot_with_cache(params: &FetchParams) -> SlotState {
        let mut slot = SlotState::new(SlotId::Fixed(0), params.clone(), VisualMode::Line);
        slot.cached = Some(CachedSeries::new(
            params.clone(),
            NormalizedSeries::new(Vec::new(), Some(1.0), Some(1.0), "X"),
        ));
        slot
    }

    #[test]
    fn empty_slot_always_fetches() {
        let params = FetchParams::new("^GSPC", "1d", "5m");
        let slot = SlotState::new(SlotId::Fixed(0), params.clone(), VisualMode::Line);
        assert!(should_refetch(&slot, &params));
    }

    #[test]
    fn mode_change_alone_reuses_cache() {
        let params = FetchParams::new("^GSPC", "1d", "5m");
        let mut slot = slot_with_cache(&params);
        slot.mode = VisualMode::Candlestick;
        assert!(!should_refetch(&slot, &params));
    }

    fn field() -> impl Strategy<Value = String> {
        prop_oneof![Just("1d".to_string()), Just("5d".to_string()), "[A-Z^]{1,6}"]
    }

    proptest! {
        #[test]
        fn equal_params_reuse(symbol in field(), range in field(), interval in field()) {
            let params = FetchParams::new(symbol, range, interval);
            let slot = slot_with_cache(&params);
            prop_assert!(!should_refetch(&slot, &params.clone()));
        }

        #[test]
        fn any_field_difference_refetches(
            a in (field(), field(), field()),
            b in (field(), field(), field()),
        ) {
            let cached = FetchParams::new(a.0, a.1, a.2);
            let requested = FetchParams::new(b.0, b.1, b.2);
            prop_assume!(cached != requested);
            let slot = slot_with_cache(&cached);
            prop_assert!(should_refetch(&slot, &requested));
        }
    }
}
