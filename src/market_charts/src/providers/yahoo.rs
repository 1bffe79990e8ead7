//! Upstream chart endpoint (`/v8/finance/chart/{symbol}`).

pub mod endpoint;
pub mod provider;
pub mod response;

pub use endpoint::ChartEndpoint;
pub use provider::YahooChartProvider;
