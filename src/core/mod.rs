//! Core state machinery for the attention monitor.
//!
//! This module contains:
//! - The attention scoring and alert state machine
//! - The session event log
//! - Session report building for export

pub mod log;
pub mod monitor;
pub mod report;

// Re-export commonly used types
pub use log::{EventLog, EventLogEntry, DEFAULT_LOG_CAP};
pub use monitor::{AttentionMonitor, MonitorStats, TickUpdate, Zone};
pub use report::{ReportBuilder, ScoreSummary, SessionReport, PRODUCER_NAME, REPORT_VERSION};
