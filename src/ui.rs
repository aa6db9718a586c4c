//! Presentation and audio sinks.
//!
//! The monitor is pure; these traits are where per-tick state becomes visible.
//! Sinks must be idempotent under repeated identical updates.

use crate::core::monitor::TickUpdate;
use std::io::Write;

/// Renders tick updates to a display surface.
pub trait PresentationSink {
    /// Reflect one tick update.
    fn render(&mut self, update: &TickUpdate);

    /// Clear any active display state (zone, status line).
    fn clear(&mut self);
}

/// Fire-and-forget audio alert trigger.
pub trait AudioSink {
    fn alert(&mut self);
}

/// Width of the textual confidence bar.
const BAR_WIDTH: usize = 20;

fn confidence_bar(probability: f64) -> String {
    let filled = (probability.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar
}

/// Console presentation sink.
///
/// Prints new log entries plus one status line per distinct update. A repeat
/// of the previously rendered update prints nothing, which keeps rendering
/// idempotent.
pub struct ConsolePresentation {
    last_update: Option<TickUpdate>,
}

impl ConsolePresentation {
    pub fn new() -> Self {
        Self { last_update: None }
    }
}

impl PresentationSink for ConsolePresentation {
    fn render(&mut self, update: &TickUpdate) {
        if self.last_update.as_ref() == Some(update) {
            return;
        }

        for entry in &update.new_entries {
            println!(
                "[{}] {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.message
            );
        }

        println!(
            "{:<16} {:>5.1}% [{}] score {:>3}% zone={}",
            update.label,
            update.confidence_percent(),
            confidence_bar(update.probability),
            update.score_percent,
            update.zone
        );
        self.last_update = Some(update.clone());
    }

    fn clear(&mut self) {
        self.last_update = None;
    }
}

impl Default for ConsolePresentation {
    fn default() -> Self {
        Self::new()
    }
}

/// Console audio sink: rings the terminal bell.
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn alert(&mut self) {
        print!("\u{7}");
        let _ = std::io::stdout().flush();
    }
}
