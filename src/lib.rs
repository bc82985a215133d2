pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod exit;
pub mod logging;
pub mod profile;
pub mod project;
pub mod reconcile;
pub mod reporting;
pub mod runner;
pub mod types;
