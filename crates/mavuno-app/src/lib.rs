//! Application service layer - config, quoting, settlement, export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
