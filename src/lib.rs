//! Vantage Sync - Davis Vantage weather station poller and archive sync
//!
//! This library exposes the core modules for testing and reuse.

pub mod clock;
pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod schema;
pub mod station;
pub mod store;
pub mod sync;
pub mod units;
