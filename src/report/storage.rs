use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::summary::{BatchSummary, ScoredCustomer};

#[derive(Debug, Serialize)]
struct SavedReport<'a> {
    timestamp: String,
    results: &'a [ScoredCustomer],
    summary: BatchSummary,
}

/// File name for a report generated at `at`: churn_report_YYYYmmdd_HHMMSS.json
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("churn_report_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Save scored results and their summary as pretty JSON in `dir`.
///
/// Creates `dir` if needed and writes atomically. Returns the written path.
pub fn save_report(
    dir: &Path,
    scored: &[ScoredCustomer],
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    crate::config::ensure_dir(dir)?;

    let path = dir.join(report_file_name(generated_at));
    let report = SavedReport {
        timestamp: generated_at.format("%Y%m%d_%H%M%S").to_string(),
        results: scored,
        summary: BatchSummary::from_scored(scored),
    };

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &report).context("Failed to serialize report")?;

    file.commit().context("Failed to save report")?;

    debug!("Saved report with {} results to {}", scored.len(), path.display());
    Ok(path)
}
