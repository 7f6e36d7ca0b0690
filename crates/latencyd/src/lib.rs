//! latencyd library - exposes modules for testing.
//!
//! Serves per-region latency and uptime statistics computed over a static
//! telemetry snapshot loaded once at startup.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;
