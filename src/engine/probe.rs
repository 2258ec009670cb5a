use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::Error;

pub const FFPROBE_BIN: &str = "ffprobe";

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

/// Check if ffprobe is available and return its version line.
pub fn ffprobe_version() -> Result<String, Error> {
    super::monitor::check_engine(FFPROBE_BIN)
}

/// Container duration of a media file in seconds, via ffprobe.
pub fn probe_duration(path: &Path) -> Result<f64> {
    let output = Command::new(FFPROBE_BIN)
        .args(["-v", "error", "-of", "json", "-show_format"])
        .arg(path)
        .output()
        .context("failed to execute ffprobe")?;

    if !output.status.success() {
        anyhow::bail!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    parse_ffprobe_duration(&String::from_utf8_lossy(&output.stdout))
}

/// Pull the duration out of ffprobe's JSON output.
pub fn parse_ffprobe_duration(json: &str) -> Result<f64> {
    let probe: ProbeOutput =
        serde_json::from_str(json).context("failed to parse ffprobe JSON output")?;

    let duration = probe
        .format
        .duration
        .context("no duration in ffprobe output")?;

    duration
        .parse::<f64>()
        .context("ffprobe duration is not a number")
}
