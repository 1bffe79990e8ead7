pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod render;
pub mod requests;
pub mod sink;
