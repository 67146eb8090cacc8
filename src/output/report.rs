//! Run report for a completed harvest

use crate::analysis::RankedFeatures;
use chrono::{DateTime, Utc};

/// Summary of one harvest run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Page the run started from
    pub root_url: String,

    /// Suffix filter applied to discovered links
    pub suffix: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Number of matching links found on the root page
    pub files_discovered: usize,

    /// Number of files whose body was retrieved
    pub files_retrieved: usize,

    /// Number of tokens counted, repeats included
    pub total_tokens: u64,

    /// Number of distinct tokens
    pub distinct_tokens: usize,

    /// The ranked features used for the script
    pub features: RankedFeatures,

    /// Where the script was written, if it was written
    pub output_path: Option<String>,
}

impl HarvestReport {
    /// Files that were discovered but not retrieved
    pub fn files_skipped(&self) -> usize {
        self.files_discovered.saturating_sub(self.files_retrieved)
    }

    /// Percentage of discovered files that were retrieved
    pub fn retrieval_rate(&self) -> f64 {
        if self.files_discovered == 0 {
            return 0.0;
        }
        (self.files_retrieved as f64 / self.files_discovered as f64) * 100.0
    }

    /// Elapsed wall-clock time in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Formats a report as plain text
pub fn format_report(report: &HarvestReport) -> String {
    let mut out = String::new();

    out.push_str("=== Harvest Summary ===\n\n");

    out.push_str("Source:\n");
    out.push_str(&format!("  Root: {}\n", report.root_url));
    out.push_str(&format!("  Suffix: {}\n", report.suffix));
    out.push_str(&format!("  Started: {}\n", report.started_at.to_rfc3339()));
    out.push_str(&format!("  Duration: {}ms\n\n", report.duration_ms()));

    out.push_str("Files:\n");
    out.push_str(&format!("  Discovered: {}\n", report.files_discovered));
    out.push_str(&format!(
        "  Retrieved: {} ({:.1}%)\n",
        report.files_retrieved,
        report.retrieval_rate()
    ));
    out.push_str(&format!("  Skipped: {}\n\n", report.files_skipped()));

    out.push_str("Tokens:\n");
    out.push_str(&format!("  Total: {}\n", report.total_tokens));
    out.push_str(&format!("  Distinct: {}\n\n", report.distinct_tokens));

    if report.features.is_empty() {
        out.push_str("Top Features: none\n");
    } else {
        out.push_str(&format!("Top Features ({}):\n", report.features.len()));
        for (rank, feature) in report.features.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {} ({})\n",
                rank + 1,
                feature.token,
                feature.count
            ));
        }
    }

    if let Some(path) = &report.output_path {
        out.push_str(&format!("\nScript: {}\n", path));
    }

    out
}

/// Prints a report to stdout
pub fn print_report(report: &HarvestReport) {
    print!("{}", format_report(report));
}
