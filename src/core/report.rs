//! Session report builder.
//!
//! At the end of a monitoring session the controller's score trace, activity
//! counters, and event log are folded into a JSON-serializable report for
//! export and later inspection.

use crate::core::log::EventLogEntry;
use crate::core::monitor::{MonitorStats, SCORE_MAX};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use uuid::Uuid;

/// The current report format version.
pub const REPORT_VERSION: &str = "1.0";

/// The name of this producer.
pub const PRODUCER_NAME: &str = "attention-monitor";

/// Producer metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier (UUID)
    pub instance_id: String,
    /// Device identifier derived from the hostname
    pub device_id: String,
}

/// Summary statistics over the session's score trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Mean score across the session
    pub mean: f64,
    /// Standard deviation of the score
    pub std_dev: f64,
    /// Lowest score observed
    pub min: f64,
    /// Score at session end
    pub final_score: f64,
    /// Number of samples in the trace
    pub samples: usize,
}

impl ScoreSummary {
    /// Summarize a score trace. An empty trace reports the initial score.
    pub fn from_trace(trace: &[f64]) -> Self {
        if trace.is_empty() {
            return Self {
                mean: SCORE_MAX,
                std_dev: 0.0,
                min: SCORE_MAX,
                final_score: SCORE_MAX,
                samples: 0,
            };
        }

        let std_dev = if trace.len() > 1 {
            Statistics::std_dev(trace.iter())
        } else {
            0.0
        };

        Self {
            mean: Statistics::mean(trace.iter()),
            std_dev,
            min: Statistics::min(trace.iter()),
            final_score: trace[trace.len() - 1],
            samples: trace.len(),
        }
    }
}

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report schema version
    pub report_version: String,
    /// Session identifier
    pub session_id: String,
    /// Session start time (RFC3339)
    pub started_at_utc: String,
    /// Session end time (RFC3339)
    pub ended_at_utc: String,
    /// Producer metadata
    pub producer: ReportProducer,
    /// Score trace summary
    pub score: ScoreSummary,
    /// Monitor activity counters
    pub stats: MonitorStats,
    /// Event log, newest-first
    pub events: Vec<EventLogEntry>,
}

/// Builder for session reports.
pub struct ReportBuilder {
    instance_id: Uuid,
    device_id: String,
}

impl ReportBuilder {
    /// Create a builder with a unique instance ID and a hostname-derived
    /// device ID.
    pub fn new() -> Self {
        let instance_id = Uuid::new_v4();
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let device_id = format!("monitor-{}-{}", host, &instance_id.to_string()[..8]);

        Self {
            instance_id,
            device_id,
        }
    }

    /// Get the instance ID.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Build a report from the session's collected state.
    pub fn build(
        &self,
        session_id: &str,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        score_trace: &[f64],
        stats: MonitorStats,
        events: Vec<EventLogEntry>,
    ) -> SessionReport {
        SessionReport {
            report_version: REPORT_VERSION.to_string(),
            session_id: session_id.to_string(),
            started_at_utc: started_at.to_rfc3339(),
            ended_at_utc: ended_at.to_rfc3339(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instance_id: self.instance_id.to_string(),
                device_id: self.device_id.clone(),
            },
            score: ScoreSummary::from_trace(score_trace),
            stats,
            events,
        }
    }

    /// Build and serialize a report to pretty JSON.
    pub fn build_json(
        &self,
        session_id: &str,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        score_trace: &[f64],
        stats: MonitorStats,
        events: Vec<EventLogEntry>,
    ) -> String {
        let report = self.build(session_id, started_at, ended_at, score_trace, stats, events);
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
