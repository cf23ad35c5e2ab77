//! HealthStat Tools module
//!
//! MCP tool implementations for the HealthStat dashboard.

pub mod charts;
pub mod chat;
pub mod metrics;
pub mod status;
