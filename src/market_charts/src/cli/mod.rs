pub mod commands;
pub mod sink;
