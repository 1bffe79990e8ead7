use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameters identifying one chart request.
///
/// `range` and `interval` are passed through to the upstream verbatim
/// (e.g. `"1d"` / `"5m"`, `"1y"` / `"1d"`); validation is left to the
/// endpoint. Two params are equivalent iff all three fields are equal, which
/// is exactly what the derived `PartialEq` checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchParams {
    pub symbol: String,
    pub range: String,
    pub interval: String,
}

impl FetchParams {
    pub fn new(
        symbol: impl Into<String>,
        range: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            range: range.into(),
            interval: interval.into(),
        }
    }
}

impl fmt::Display for FetchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} @ {}]", self.symbol, self.range, self.interval)
    }
}
