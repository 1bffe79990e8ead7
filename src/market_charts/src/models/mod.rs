pub mod fetch_params;
pub mod price_point;
pub mod series;
pub mod slot;
pub mod symbol;
