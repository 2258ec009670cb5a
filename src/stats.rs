// Size and timing presentation for the post-run summary

use std::fs;
use std::path::Path;

/// Before/after byte counts for one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSummary {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl SizeSummary {
    /// Read both file sizes; None unless both paths exist.
    pub fn collect(input: &Path, output: &Path) -> Option<Self> {
        let input_bytes = fs::metadata(input).ok()?.len();
        let output_bytes = fs::metadata(output).ok()?.len();
        Some(Self {
            input_bytes,
            output_bytes,
        })
    }

    /// Format space saved relative to the input, with a percentage when the
    /// output actually shrank.
    pub fn format_space_saved(&self) -> String {
        let delta = self.input_bytes as i64 - self.output_bytes as i64;
        if delta >= 0 {
            let pct = if self.input_bytes > 0 {
                delta as f64 / self.input_bytes as f64 * 100.0
            } else {
                0.0
            };
            format!("{} saved ({:.1}%)", format_mb(delta as u64), pct)
        } else {
            format!("{} larger", format_mb((-delta) as u64))
        }
    }
}

/// Megabytes at two-decimal precision: `bytes / 1048576`.
pub fn format_mb(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.2} MB", bytes as f64 / MB)
}
