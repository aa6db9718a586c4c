//! Attention Monitor CLI
//!
//! Runs monitoring sessions against the synthetic frame source and manages
//! exported session reports.

use attention_monitor::{
    camera::{check_permission, SyntheticCamera},
    classify::ScriptedClassifier,
    config::Config,
    core::{ReportBuilder, SessionReport},
    session::{SessionCommand, SessionController},
    ui::{ConsoleAudio, ConsolePresentation},
    VERSION,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Demo label set matching the published attention models.
const DEFAULT_LABELS: [&str; 3] = ["Focus", "Looking Away", "Distracted"];

#[derive(Parser)]
#[command(name = "attention-monitor")]
#[command(version = VERSION)]
#[command(about = "Classification-driven webcam attention monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a monitoring session
    Start {
        /// Comma-separated label script for the demo classifier
        #[arg(long)]
        labels: Option<String>,

        /// Tick interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many ticks (default: run until Ctrl+C)
        #[arg(long)]
        ticks: Option<u64>,

        /// Base URL of a remote model (requires remote feature)
        #[arg(long)]
        model: Option<String>,
    },

    /// Show configuration and the most recent session's statistics
    Status,

    /// Merge exported session reports
    Export {
        /// Output directory for the merged export
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Export format (json or jsonl)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            labels,
            interval_ms,
            ticks,
            model,
        } => {
            cmd_start(labels, interval_ms, ticks, model);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Export { output, format } => {
            cmd_export(output, &format);
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_start(
    labels: Option<String>,
    interval_ms: Option<u64>,
    max_ticks: Option<u64>,
    model: Option<String>,
) {
    println!("Attention Monitor v{VERSION}");
    println!();

    if !check_permission() {
        eprintln!("Error: Camera permission not granted.");
        std::process::exit(1);
    }

    let mut config = Config::load().unwrap_or_default();
    if let Some(ms) = interval_ms {
        config.tick_interval = Duration::from_millis(ms);
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    // Resolve the label set: remote model metadata when configured, a label
    // script from the CLI, or the built-in demo labels.
    let model_url = model.or_else(|| config.model_url.clone());
    let label_set = resolve_label_set(&model_url, &labels);

    println!("Starting session...");
    println!("  Labels: {}", label_set.join(", "));
    println!(
        "  Tick interval: {}ms",
        config.tick_interval.as_millis()
    );
    println!(
        "  Camera: {}x{} (synthetic)",
        config.camera.width, config.camera.height
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let label_refs: Vec<&str> = label_set.iter().map(|s| s.as_str()).collect();
    let classifier = ScriptedClassifier::cycling(&label_refs, 0.9);
    let camera = SyntheticCamera::new(config.camera.width, config.camera.height);

    let mut controller = SessionController::new(
        classifier,
        camera,
        config.tick_interval,
        config.event_log_cap,
    );

    let stop_handle = controller.control_handle();
    ctrlc::set_handler(move || {
        let _ = stop_handle.send(SessionCommand::Stop);
    })
    .expect("Error setting Ctrl+C handler");

    let mut presentation = ConsolePresentation::new();
    let mut audio = ConsoleAudio;

    if let Err(e) = controller.start() {
        eprintln!("Error: {e}");
        for entry in controller.monitor().log().iter() {
            eprintln!("[{}] {}", entry.timestamp.format("%H:%M:%S"), entry.message);
        }
        std::process::exit(1);
    }

    let run_result = controller.run(&mut presentation, &mut audio, max_ticks);
    controller.stop(&mut presentation);

    // Export the session report
    let builder = ReportBuilder::new();
    let report = controller.report(&builder);
    let export_path = config.export_path.join(format!(
        "session_{}.json",
        Utc::now().format("%Y%m%d_%H%M%S")
    ));
    if let Some(parent) = export_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&export_path, json) {
                eprintln!("Error writing session report: {e}");
            } else {
                println!();
                println!("Exported session report to {export_path:?}");
            }
        }
        Err(e) => {
            eprintln!("Error serializing session report: {e}");
        }
    }

    println!();
    println!("Session statistics:");
    println!("  Ticks: {}", report.stats.ticks);
    println!("  Low alerts: {}", report.stats.low_alerts);
    println!("  Critical alerts: {}", report.stats.critical_alerts);
    println!("  Recoveries: {}", report.stats.recoveries);
    println!("  Mean score: {:.1}", report.score.mean);
    println!("  Final score: {:.0}", report.score.final_score);

    if let Err(e) = run_result {
        eprintln!();
        eprintln!("Session ended with error: {e}");
        std::process::exit(1);
    }
}

#[allow(unused_variables)]
fn resolve_label_set(model_url: &Option<String>, labels: &Option<String>) -> Vec<String> {
    #[cfg(feature = "remote")]
    if let Some(url) = model_url {
        match fetch_remote_labels(url) {
            Ok(remote_labels) => return remote_labels,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "remote"))]
    if model_url.is_some() {
        eprintln!("Warning: --model ignored (remote feature not enabled at compile time)");
    }

    default_label_set(labels)
}

fn default_label_set(labels: &Option<String>) -> Vec<String> {
    match labels {
        Some(csv) => csv
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(feature = "remote")]
fn fetch_remote_labels(url: &str) -> Result<Vec<String>, attention_monitor::ClassifyError> {
    use attention_monitor::{BlockingModelClient, ModelRef};

    let client = BlockingModelClient::new(ModelRef::new(url))?;
    let metadata = client.fetch_metadata()?;
    if let Some(name) = &metadata.model_name {
        println!("Loaded model metadata: {name}");
    }
    Ok(metadata.labels)
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Attention Monitor Status");
    println!("========================");
    println!();
    println!("Configuration:");
    println!("  Tick interval: {}ms", config.tick_interval.as_millis());
    println!(
        "  Camera: {}x{}",
        config.camera.width, config.camera.height
    );
    println!(
        "  Model URL: {}",
        config.model_url.as_deref().unwrap_or("(none)")
    );
    println!("  Event log cap: {}", config.event_log_cap);
    println!();

    match latest_session_report(&config.export_path) {
        Some((path, report)) => {
            println!("Last session ({}):", path.display());
            println!("  Session ID: {}", report.session_id);
            println!("  Ticks: {}", report.stats.ticks);
            println!("  Low alerts: {}", report.stats.low_alerts);
            println!("  Critical alerts: {}", report.stats.critical_alerts);
            println!("  Recoveries: {}", report.stats.recoveries);
            println!("  Mean score: {:.1}", report.score.mean);
        }
        None => {
            println!("No previous session data found.");
        }
    }
}

/// Find and parse the most recently written session report.
fn latest_session_report(export_dir: &PathBuf) -> Option<(PathBuf, SessionReport)> {
    let mut session_files: Vec<PathBuf> = std::fs::read_dir(export_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .map(|n| n.starts_with("session_") && n.ends_with(".json"))
                        .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default();

    session_files.sort();
    let path = session_files.pop()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let report: SessionReport = serde_json::from_str(&content).ok()?;
    Some((path, report))
}

fn cmd_export(output: Option<PathBuf>, format: &str) {
    let config = Config::load().unwrap_or_default();
    let export_dir = output.unwrap_or(config.export_path.clone());

    let session_files: Vec<PathBuf> = std::fs::read_dir(&export_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .map(|n| n.starts_with("session_") && n.ends_with(".json"))
                        .unwrap_or(false)
                })
                .collect()
        })
        .unwrap_or_default();

    if session_files.is_empty() {
        println!("No session data found in {export_dir:?}");
        println!("Run 'attention-monitor start' to record a session.");
        return;
    }

    println!(
        "Found {} session file(s) in {:?}",
        session_files.len(),
        export_dir
    );

    let mut all_reports: Vec<SessionReport> = Vec::new();
    for file in &session_files {
        if let Ok(content) = std::fs::read_to_string(file) {
            if let Ok(report) = serde_json::from_str::<SessionReport>(&content) {
                all_reports.push(report);
            }
        }
    }

    println!("Total reports: {}", all_reports.len());

    let output_path = export_dir.join(format!(
        "export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        if format == "jsonl" { "jsonl" } else { "json" }
    ));

    let result = if format == "jsonl" {
        let lines: Vec<String> = all_reports
            .iter()
            .filter_map(|r| serde_json::to_string(r).ok())
            .collect();
        std::fs::write(&output_path, lines.join("\n"))
    } else {
        match serde_json::to_string_pretty(&all_reports) {
            Ok(json) => std::fs::write(&output_path, json),
            Err(e) => {
                eprintln!("Error serializing: {e}");
                return;
            }
        }
    };

    match result {
        Ok(_) => println!("Exported to {output_path:?}"),
        Err(e) => eprintln!("Error writing export: {e}"),
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
