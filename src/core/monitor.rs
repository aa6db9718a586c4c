//! Attention scoring and alert state machine.
//!
//! The monitor consumes one classification result per tick and maintains a
//! bounded attention score with hysteresis-based alerting. It is a pure state
//! transition: `on_tick` never fails on valid input and performs no I/O. The
//! caller projects the returned [`TickUpdate`] onto presentation and audio
//! sinks.

use crate::classify::types::ClassificationResult;
use crate::core::log::{EventLog, EventLogEntry};
use serde::{Deserialize, Serialize};

/// Upper bound of the attention score.
pub const SCORE_MAX: f64 = 100.0;
/// Lower bound of the attention score.
pub const SCORE_MIN: f64 = 0.0;

/// Score gained per focused tick.
pub const FOCUS_REWARD: f64 = 1.0;
/// Score lost per looking-away tick.
pub const LOOKING_AWAY_PENALTY: f64 = 0.5;
/// Score lost per distracted tick.
pub const DISTRACTED_PENALTY: f64 = 1.0;

/// Score at or below which the one-shot low alert fires.
pub const LOW_ALERT_THRESHOLD: f64 = 50.0;
/// Score at or below which the alert sound repeats every tick.
pub const CRITICAL_ALERT_THRESHOLD: f64 = 10.0;
/// Score at or above which an active alert is cleared.
pub const RECOVERY_THRESHOLD: f64 = 80.0;

const LABEL_FOCUS: &str = "focus";
const LABEL_LOOKING_AWAY: &str = "looking away";
const LABEL_DISTRACTED: &str = "distracted";

/// Visual attention indicator. Exactly one zone is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Green,
    Yellow,
    RedFlash,
    Neutral,
}

impl Zone {
    /// Derive the zone from a case-folded label.
    fn from_folded_label(label: &str) -> Self {
        match label {
            LABEL_FOCUS => Zone::Green,
            LABEL_LOOKING_AWAY => Zone::Yellow,
            LABEL_DISTRACTED => Zone::RedFlash,
            _ => Zone::Neutral,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Green => "green",
            Zone::Yellow => "yellow",
            Zone::RedFlash => "red-flash",
            Zone::Neutral => "neutral",
        };
        write!(f, "{name}")
    }
}

/// Everything a sink needs to reflect one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    /// Raw best-guess label
    pub label: String,
    /// Best-guess probability in [0, 1]
    pub probability: f64,
    /// Attention score after this tick, in [0, 100]
    pub score: f64,
    /// Score rounded to the nearest whole percent
    pub score_percent: u32,
    /// Active visual zone
    pub zone: Zone,
    /// Whether the audio sink should fire this tick
    pub play_sound: bool,
    /// Log entries appended during this tick, oldest first
    pub new_entries: Vec<EventLogEntry>,
}

impl TickUpdate {
    /// Best-guess probability as a percentage, rounded to one decimal place.
    pub fn confidence_percent(&self) -> f64 {
        (self.probability * 1000.0).round() / 10.0
    }
}

/// Counters describing monitor activity for the current session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MonitorStats {
    /// Ticks processed
    pub ticks: u64,
    /// Audio alerts fired (one-shot and per-tick critical)
    pub sounds_fired: u64,
    /// Low alerts fired
    pub low_alerts: u64,
    /// Critical alerts fired
    pub critical_alerts: u64,
    /// Recoveries observed
    pub recoveries: u64,
}

/// Attention scoring state machine.
pub struct AttentionMonitor {
    score: f64,
    last_label: Option<String>,
    low_alert_active: bool,
    critical_alert_active: bool,
    log: EventLog,
    stats: MonitorStats,
}

impl AttentionMonitor {
    /// Create a monitor with the default event-log retention cap.
    pub fn new() -> Self {
        Self::with_log_cap(crate::core::log::DEFAULT_LOG_CAP)
    }

    /// Create a monitor with an explicit event-log retention cap
    /// (0 = unbounded).
    pub fn with_log_cap(cap: usize) -> Self {
        Self {
            score: SCORE_MAX,
            last_label: None,
            low_alert_active: false,
            critical_alert_active: false,
            log: EventLog::with_cap(cap),
            stats: MonitorStats::default(),
        }
    }

    /// Reset scoring state for a new session.
    ///
    /// The score returns to 100, alert flags clear, and the last-seen label
    /// is forgotten so the first tick of the session logs a state change.
    /// The event log is kept; stopping a session does not clear it either.
    pub fn start(&mut self) {
        self.score = SCORE_MAX;
        self.last_label = None;
        self.low_alert_active = false;
        self.critical_alert_active = false;
        self.stats = MonitorStats::default();
    }

    /// Process one classification result.
    ///
    /// An empty result leaves all state untouched and reports a neutral,
    /// soundless update; callers are expected to skip the tick on upstream
    /// failures before reaching this point.
    pub fn on_tick(&mut self, result: &ClassificationResult) -> TickUpdate {
        let best = match result.best_guess() {
            Some(best) => best.clone(),
            None => {
                return TickUpdate {
                    label: String::new(),
                    probability: 0.0,
                    score: self.score,
                    score_percent: self.score.round() as u32,
                    zone: Zone::Neutral,
                    play_sound: false,
                    new_entries: Vec::new(),
                };
            }
        };

        let mut new_entries = Vec::new();
        let folded = best.label.to_lowercase();

        // Label-indexed score policy, clamped to [0, 100].
        match folded.as_str() {
            LABEL_FOCUS => self.score = (self.score + FOCUS_REWARD).min(SCORE_MAX),
            LABEL_LOOKING_AWAY => {
                self.score = (self.score - LOOKING_AWAY_PENALTY).max(SCORE_MIN)
            }
            LABEL_DISTRACTED => self.score = (self.score - DISTRACTED_PENALTY).max(SCORE_MIN),
            _ => {}
        }

        // Ordered alert rules on the post-delta score. The critical rule is
        // chained behind the low rule, so a critical alert is only reachable
        // on a tick where the low alert did not fire, i.e. once a low alert
        // is already active.
        let mut play_sound = false;
        if self.score <= LOW_ALERT_THRESHOLD && !self.low_alert_active {
            play_sound = true;
            self.low_alert_active = true;
            self.stats.low_alerts += 1;
            new_entries.push(self.log.append(format!(
                "Low attention alert (score {})",
                self.score.round() as i64
            )));
        } else if self.score <= CRITICAL_ALERT_THRESHOLD {
            // Sound repeats every tick in the critical band; the log entry
            // is one-shot per excursion.
            play_sound = true;
            if !self.critical_alert_active {
                self.critical_alert_active = true;
                self.stats.critical_alerts += 1;
                new_entries.push(self.log.append("Critical attention level"));
            }
        }
        if self.score >= RECOVERY_THRESHOLD && self.low_alert_active {
            self.low_alert_active = false;
            self.critical_alert_active = false;
            self.stats.recoveries += 1;
            new_entries.push(self.log.append("Attention recovered"));
        }

        // State change is keyed on the raw label, not the folded one.
        if self.last_label.as_deref() != Some(best.label.as_str()) {
            new_entries.push(
                self.log
                    .append(format!("State changed to {}", best.label)),
            );
            self.last_label = Some(best.label.clone());
        }

        self.stats.ticks += 1;
        if play_sound {
            self.stats.sounds_fired += 1;
        }

        TickUpdate {
            label: best.label,
            probability: best.probability,
            score: self.score,
            score_percent: self.score.round() as u32,
            zone: Zone::from_folded_label(&folded),
            play_sound,
            new_entries,
        }
    }

    /// Record a lifecycle event (session started, stopped, startup failure).
    pub fn record_event(&mut self, message: impl Into<String>) -> EventLogEntry {
        self.log.append(message)
    }

    /// Current attention score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether a low alert is currently active.
    pub fn low_alert_active(&self) -> bool {
        self.low_alert_active
    }

    /// Whether a critical alert is currently active.
    pub fn critical_alert_active(&self) -> bool {
        self.critical_alert_active
    }

    /// Last raw label seen, if any.
    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }

    /// The session event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Activity counters for the current session.
    pub fn stats(&self) -> MonitorStats {
        self.stats
    }
}

impl Default for AttentionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
