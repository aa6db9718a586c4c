//! End-to-end tests for the attention monitor and session controller.

use attention_monitor::{
    AttentionMonitor, AudioSink, CameraError, ClassificationResult, PresentationSink,
    ReportBuilder, ScriptedClassifier, SessionController, SessionError, SessionState,
    SyntheticCamera, TickUpdate, Zone,
};
use std::time::Duration;

fn single(label: &str, probability: f64) -> ClassificationResult {
    ClassificationResult::from_pairs(&[(label, probability)])
}

/// Presentation sink that records every update it is asked to render.
#[derive(Default)]
struct RecordingPresentation {
    updates: Vec<TickUpdate>,
    cleared: u32,
}

impl PresentationSink for RecordingPresentation {
    fn render(&mut self, update: &TickUpdate) {
        self.updates.push(update.clone());
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

#[derive(Default)]
struct RecordingAudio {
    alerts: u32,
}

impl AudioSink for RecordingAudio {
    fn alert(&mut self) {
        self.alerts += 1;
    }
}

#[test]
fn test_label_sequence_scores_and_log() {
    let mut monitor = AttentionMonitor::new();

    let updates: Vec<TickUpdate> = [
        ("Focus", 0.9),
        ("Focus", 0.9),
        ("Looking Away", 0.8),
        ("Distracted", 0.95),
    ]
    .iter()
    .map(|(label, p)| monitor.on_tick(&single(label, *p)))
    .collect();

    let scores: Vec<f64> = updates.iter().map(|u| u.score).collect();
    assert_eq!(scores, vec![100.0, 100.0, 99.5, 98.5]);

    // State changes: Focus on the first tick of the session, then the two
    // label transitions. No alerts of any kind.
    assert_eq!(monitor.log().count_matching("State changed to Focus"), 1);
    assert_eq!(
        monitor.log().count_matching("State changed to Looking Away"),
        1
    );
    assert_eq!(
        monitor.log().count_matching("State changed to Distracted"),
        1
    );
    assert_eq!(monitor.log().count_matching("alert"), 0);
    assert!(updates.iter().all(|u| !u.play_sound));

    let zones: Vec<Zone> = updates.iter().map(|u| u.zone).collect();
    assert_eq!(
        zones,
        vec![Zone::Green, Zone::Green, Zone::Yellow, Zone::RedFlash]
    );
}

#[test]
fn test_score_never_leaves_bounds() {
    let mut monitor = AttentionMonitor::new();
    let sequence = [
        ("Distracted", 0.9),
        ("Focus", 0.9),
        ("Looking Away", 0.9),
        ("Unknown Pose", 0.9),
    ];

    for i in 0..400 {
        let (label, p) = sequence[i % sequence.len()];
        let update = monitor.on_tick(&single(label, p));
        assert!(update.score >= 0.0 && update.score <= 100.0);
        assert!(update.score_percent <= 100);
    }
}

#[test]
fn test_tie_break_is_first_encountered() {
    let mut monitor = AttentionMonitor::new();
    let update = monitor.on_tick(&ClassificationResult::from_pairs(&[
        ("Looking Away", 0.5),
        ("Focus", 0.5),
        ("Distracted", 0.5),
    ]));

    assert_eq!(update.label, "Looking Away");
    assert_eq!(update.zone, Zone::Yellow);
}

#[test]
fn test_low_alert_descent_and_hysteresis() {
    let mut monitor = AttentionMonitor::new();

    // 100 -> 50: exactly one low alert, score included in the message.
    for _ in 0..50 {
        monitor.on_tick(&single("Distracted", 0.9));
    }
    assert_eq!(monitor.log().count_matching("Low attention alert (score 50)"), 1);
    assert_eq!(monitor.stats().low_alerts, 1);
    assert_eq!(monitor.stats().sounds_fired, 1);

    // 50 -> 49: no duplicate low alert, no critical alert.
    let update = monitor.on_tick(&single("Distracted", 0.9));
    assert!(!update.play_sound);
    assert_eq!(monitor.stats().low_alerts, 1);
    assert_eq!(monitor.stats().critical_alerts, 0);
}

#[test]
fn test_critical_only_after_low_has_fired() {
    let mut monitor = AttentionMonitor::new();
    for _ in 0..90 {
        monitor.on_tick(&single("Distracted", 0.9));
    }

    // The low alert fired on the way down; critical fired at 10.
    assert_eq!(monitor.stats().low_alerts, 1);
    assert_eq!(monitor.stats().critical_alerts, 1);
    assert!(monitor.low_alert_active());
    assert!(monitor.critical_alert_active());

    // In the critical band every tick sounds but the log entry stays one-shot.
    let before = monitor.stats().sounds_fired;
    for _ in 0..5 {
        assert!(monitor.on_tick(&single("Distracted", 0.9)).play_sound);
    }
    assert_eq!(monitor.stats().sounds_fired, before + 5);
    assert_eq!(monitor.log().count_matching("Critical attention level"), 1);
}

#[test]
fn test_recovery_requires_prior_low_alert() {
    let mut monitor = AttentionMonitor::new();

    // 100 -> 60 -> 85 without ever reaching 50: no recovery entry.
    for _ in 0..40 {
        monitor.on_tick(&single("Distracted", 0.9));
    }
    for _ in 0..25 {
        monitor.on_tick(&single("Focus", 0.9));
    }
    assert_eq!(monitor.log().count_matching("Attention recovered"), 0);
    assert_eq!(monitor.stats().recoveries, 0);
}

#[test]
fn test_recovery_rearms_low_alert() {
    let mut monitor = AttentionMonitor::new();
    for _ in 0..55 {
        monitor.on_tick(&single("Distracted", 0.9));
    }
    assert_eq!(monitor.stats().low_alerts, 1);

    // Climb from 45 past 80: one recovery, flags cleared.
    for _ in 0..40 {
        monitor.on_tick(&single("Focus", 0.9));
    }
    assert_eq!(monitor.stats().recoveries, 1);
    assert!(!monitor.low_alert_active());

    // A second descent fires a second low alert.
    for _ in 0..40 {
        monitor.on_tick(&single("Distracted", 0.9));
    }
    assert_eq!(monitor.stats().low_alerts, 2);
}

#[test]
fn test_session_end_to_end() {
    let classifier = ScriptedClassifier::cycling(&["Focus", "Looking Away", "Distracted"], 0.9);
    let camera = SyntheticCamera::new(400, 300);
    let mut controller = SessionController::new(classifier, camera, Duration::ZERO, 0);

    let mut presentation = RecordingPresentation::default();
    let mut audio = RecordingAudio::default();

    controller.start().unwrap();
    controller
        .run(&mut presentation, &mut audio, Some(12))
        .unwrap();
    controller.stop(&mut presentation);

    assert_eq!(controller.state(), SessionState::Idle);
    assert_eq!(presentation.updates.len(), 12);
    assert_eq!(presentation.cleared, 1);

    // The cycle is Focus, Looking Away, Distracted repeating.
    assert_eq!(presentation.updates[0].label, "Focus");
    assert_eq!(presentation.updates[1].label, "Looking Away");
    assert_eq!(presentation.updates[2].label, "Distracted");

    // First cycle loses 1.5 (the focus reward clamps at 100), each later
    // cycle loses 0.5 net: 100 - 1.5 - 3 * 0.5 = 97.
    assert_eq!(controller.monitor().score(), 97.0);
    assert_eq!(audio.alerts, 0);

    let report = controller.report(&ReportBuilder::new());
    assert_eq!(report.stats.ticks, 12);
    // Initial score plus one sample per tick.
    assert_eq!(report.score.samples, 13);
    assert_eq!(report.score.final_score, 97.0);
    assert!(report.session_id.starts_with("SESS-"));
    assert!(report
        .events
        .first()
        .map(|e| e.message == "System Stopped")
        .unwrap_or(false));
}

#[test]
fn test_permission_denied_session() {
    let classifier = ScriptedClassifier::cycling(&["Focus"], 0.9);
    let camera = SyntheticCamera::denied(400, 300);
    let mut controller = SessionController::new(classifier, camera, Duration::ZERO, 0);

    let err = controller.start().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Camera(CameraError::PermissionDenied)
    ));
    assert_eq!(controller.state(), SessionState::Errored);
    assert_eq!(controller.monitor().log().len(), 1);
    assert_eq!(
        controller.monitor().log().iter().next().unwrap().message,
        "Camera permission denied"
    );

    // The tick loop never runs from Errored.
    let mut presentation = RecordingPresentation::default();
    let mut audio = RecordingAudio::default();
    assert!(controller
        .run(&mut presentation, &mut audio, Some(1))
        .is_err());
    assert!(presentation.updates.is_empty());
}
