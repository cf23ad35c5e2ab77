//! HealthStat Library
//!
//! Health metric calculations, dashboard charts and the health assistant relay.

pub mod build_info;
pub mod charts;
pub mod chat;
pub mod config;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod tools;
