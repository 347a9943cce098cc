use std::path::Path;
use std::str::FromStr;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::Settings;

/// Overrides `settings.log_level` when set.
pub const LOG_LEVEL_ENV: &str = "HELM_SAFE_LOG";

/// Route `log` records to the configured log file.
/// Best-effort: failures are silently ignored (logging must never block helm).
pub fn init(settings: &Settings, env_level: Option<&str>) {
    let Some(path) = settings.log_path() else {
        return;
    };
    let level = parse_level(env_level.unwrap_or(&settings.log_level));
    if level == LevelFilter::Off {
        return;
    }
    let _ = init_file(&path, level);
}

fn init_file(path: &Path, level: LevelFilter) -> Option<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok()?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    WriteLogger::init(level, config, file).ok()
}

/// Unknown level names fall back to `info`.
fn parse_level(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw.trim()).unwrap_or(LevelFilter::Info)
}

/// Record the outcome of one invocation as a single JSON line.
pub fn log_decision(command_line: &str, classification: &str, outcome: &str) {
    // Compact the command for the log; the full line goes to helm untouched
    let cmd_truncated: String = command_line.chars().take(200).collect();
    let record = serde_json::json!({
        "command": cmd_truncated,
        "classification": classification,
        "outcome": outcome,
    });
    log::info!("{record}");
}
