// src/cli/mod.rs
//! Command-line front end.

pub mod args;
pub mod dispatch;

pub use args::Cli;
