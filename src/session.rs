//! Session lifecycle and tick loop.
//!
//! A [`SessionController`] owns the frame source, the classifier, and the
//! attention monitor, and drives the capture → classify → update → project
//! cycle. Everything runs on one thread; a tick is fully processed before the
//! next is scheduled, so a slow classifier simply slows the effective tick
//! rate. Stop requests arrive over a control channel polled before each tick,
//! which makes the pending tick revocable.

use crate::camera::{CameraError, FrameSource};
use crate::classify::{Classifier, ClassifyError};
use crate::core::monitor::AttentionMonitor;
use crate::core::report::{ReportBuilder, SessionReport};
use crate::ui::{AudioSink, PresentationSink};
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::{Duration, Instant};

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    /// Startup failed; the tick loop never ran.
    Errored,
}

/// Commands accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Stop,
}

/// Errors from session control.
#[derive(Debug)]
pub enum SessionError {
    /// The frame source failed at startup
    Camera(CameraError),
    /// The classifier failed mid-session; fatal, restart explicitly
    Classify(ClassifyError),
    /// The requested operation needs a different lifecycle state
    NotRunning,
    /// A session is already running
    AlreadyRunning,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Camera(e) => write!(f, "Session startup failed: {e}"),
            SessionError::Classify(e) => write!(f, "Session failed: {e}"),
            SessionError::NotRunning => write!(f, "Session is not running"),
            SessionError::AlreadyRunning => write!(f, "Session is already running"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<CameraError> for SessionError {
    fn from(e: CameraError) -> Self {
        SessionError::Camera(e)
    }
}

impl From<ClassifyError> for SessionError {
    fn from(e: ClassifyError) -> Self {
        SessionError::Classify(e)
    }
}

/// Owns a monitoring session end to end.
pub struct SessionController<C: Classifier, F: FrameSource> {
    classifier: C,
    camera: F,
    monitor: AttentionMonitor,
    state: SessionState,
    tick_budget: Duration,
    control_tx: Sender<SessionCommand>,
    control_rx: Receiver<SessionCommand>,
    session_id: String,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    score_trace: Vec<f64>,
}

impl<C: Classifier, F: FrameSource> SessionController<C, F> {
    /// Create a controller. `tick_budget` paces the loop: if a tick finishes
    /// early the remainder is slept away.
    pub fn new(classifier: C, camera: F, tick_budget: Duration, log_cap: usize) -> Self {
        let (control_tx, control_rx) = unbounded();
        Self {
            classifier,
            camera,
            monitor: AttentionMonitor::with_log_cap(log_cap),
            state: SessionState::Idle,
            tick_budget,
            control_tx,
            control_rx,
            session_id: String::new(),
            started_at: None,
            ended_at: None,
            score_trace: Vec::new(),
        }
    }

    /// A handle for requesting a stop from another thread (e.g. a Ctrl-C
    /// handler).
    pub fn control_handle(&self) -> Sender<SessionCommand> {
        self.control_tx.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The attention monitor, for inspecting score, flags, and the log.
    pub fn monitor(&self) -> &AttentionMonitor {
        &self.monitor
    }

    /// Session identifier, set once the session starts.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Acquire the frame source and reset monitoring state.
    ///
    /// A permission denial (or any other setup failure) moves the session to
    /// `Errored`, logs exactly one entry, and the tick loop never runs.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Running {
            return Err(SessionError::AlreadyRunning);
        }

        if let Err(e) = self.camera.setup() {
            self.state = SessionState::Errored;
            self.monitor.record_event(e.to_string());
            return Err(e.into());
        }
        self.camera.play();

        self.monitor.start();
        self.score_trace.clear();
        self.score_trace.push(self.monitor.score());

        let now = Utc::now();
        self.session_id = format!("SESS-{}", now.timestamp_millis());
        self.started_at = Some(now);
        self.ended_at = None;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Run the tick loop until a stop is requested, `max_ticks` is reached,
    /// or a tick fails.
    ///
    /// A tick failure is fatal and leaves the session in `Running`; the
    /// caller decides when to [`stop`](Self::stop). The loop itself never
    /// stops the session so that both exit paths are handled the same way.
    pub fn run(
        &mut self,
        presentation: &mut dyn PresentationSink,
        audio: &mut dyn AudioSink,
        max_ticks: Option<u64>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::NotRunning);
        }

        let mut ticks: u64 = 0;
        loop {
            // A queued stop cancels the pending tick before any capture work.
            if self.control_rx.try_recv() == Ok(SessionCommand::Stop) {
                break;
            }
            if let Some(max) = max_ticks {
                if ticks >= max {
                    break;
                }
            }

            let tick_start = Instant::now();

            let frame = self.camera.update();
            let result = self.classifier.predict(&frame)?;
            let update = self.monitor.on_tick(&result);
            self.score_trace.push(update.score);

            if update.play_sound {
                audio.alert();
            }
            presentation.render(&update);

            ticks += 1;

            let elapsed = tick_start.elapsed();
            if elapsed < self.tick_budget {
                std::thread::sleep(self.tick_budget - elapsed);
            }
        }

        Ok(())
    }

    /// Stop a running session: release the frame source, log the stop, clear
    /// the display. The event log is kept. No-op unless running.
    pub fn stop(&mut self, presentation: &mut dyn PresentationSink) {
        if self.state != SessionState::Running {
            return;
        }
        self.camera.stop();
        self.monitor.record_event("System Stopped");
        presentation.clear();
        self.ended_at = Some(Utc::now());
        self.state = SessionState::Idle;
    }

    /// Build a report for the most recent session.
    pub fn report(&self, builder: &ReportBuilder) -> SessionReport {
        let started = self.started_at.unwrap_or_else(Utc::now);
        let ended = self.ended_at.unwrap_or_else(Utc::now);
        builder.build(
            &self.session_id,
            started,
            ended,
            &self.score_trace,
            self.monitor.stats(),
            self.monitor.log().to_vec(),
        )
    }
}
