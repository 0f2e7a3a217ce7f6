//! Run report generation
//!
//! Summarizes which files a preprocessing run rewrote.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome for a single processed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub changed: bool,
    pub duration_ms: u64,
}

impl FileReport {
    pub fn new(source: PathBuf, target: PathBuf, changed: bool, duration: Duration) -> Self {
        Self {
            source,
            target,
            changed,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Summary of a preprocessing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl RunSummary {
    pub fn from_files(files: &[FileReport]) -> Self {
        let total = files.len();
        let changed = files.iter().filter(|f| f.changed).count();
        Self {
            total,
            changed,
            unchanged: total - changed,
        }
    }
}

/// A report for one preprocessing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub defined_symbols: String,
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Create a new run report
    pub fn new(defined_symbols: &str, files: Vec<FileReport>) -> Self {
        Self {
            timestamp: Utc::now(),
            defined_symbols: defined_symbols.to_string(),
            summary: RunSummary::from_files(&files),
            files,
        }
    }

    /// Generate a markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# XAML Preprocessing Report\n\n");
        md.push_str(&format!("**Defined symbols:** {}\n", self.defined_symbols));
        md.push_str(&format!(
            "**Date:** {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("| Metric | Count |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", self.summary.total));
        md.push_str(&format!("| Changed | {} |\n", self.summary.changed));
        md.push_str(&format!("| Unchanged | {} |\n\n", self.summary.unchanged));

        if !self.files.is_empty() {
            md.push_str("| Source | Target | Changed | Duration |\n");
            md.push_str("|--------|--------|---------|----------|\n");
            for f in &self.files {
                md.push_str(&format!(
                    "| {} | {} | {} | {}ms |\n",
                    f.source.display(),
                    if f.changed { f.target.display().to_string() } else { "-".to_string() },
                    if f.changed { "yes" } else { "no" },
                    f.duration_ms
                ));
            }
        }

        md
    }

    /// Generate a JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
