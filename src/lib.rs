pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod logging;
pub mod reader;
pub mod region;
pub mod repair;
pub mod reporting;
pub mod store;
