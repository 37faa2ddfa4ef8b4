//! Report generation for dissemination analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use super::summary::{summarize, Distribution, MetricsSummary};
use super::types::*;

/// Where and when an analysis ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub analysis_timestamp: String,
    pub log_file: String,
    pub marker: String,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub line_stats: LineStats,
    pub summary: MetricsSummary,
    /// Per-message metrics; empty unless a detailed report was requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
}

impl AnalysisReport {
    pub fn new(log_file: &Path, marker: &str, analysis: Analysis, detailed: bool) -> Self {
        let summary = summarize(&analysis.metrics);
        Self {
            metadata: ReportMetadata {
                analysis_timestamp: chrono::Utc::now().to_rfc3339(),
                log_file: log_file.display().to_string(),
                marker: marker.to_string(),
            },
            line_stats: analysis.line_stats,
            summary,
            metrics: if detailed { analysis.metrics } else { Vec::new() },
        }
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

fn push_distribution(lines: &mut Vec<String>, label: &str, d: &Distribution, unit: &str) {
    lines.push(format!("{}:", label));
    lines.push(format!("  Mean: {:.2}{}", d.mean, unit));
    lines.push(format!("  Median: {:.2}{}", d.median, unit));
    lines.push(format!("  95th percentile: {:.2}{}", d.p95, unit));
    lines.push(format!("  Max: {:.2}{}", d.max, unit));
    lines.push(String::new());
}

/// Render the text report
pub fn render_text_report(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                     GOSSIP DISSEMINATION ANALYSIS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Analysis Date: {}", report.metadata.analysis_timestamp));
    lines.push(format!("Log File: {}", report.metadata.log_file));
    lines.push(format!("Marker: {}", report.metadata.marker));
    lines.push(format!(
        "Lines: {} read, {} message records, {} skipped",
        report.line_stats.lines_read,
        report.line_stats.relevant_lines,
        report.line_stats.irrelevant_lines
    ));
    lines.push(format!("Messages: {}", report.summary.message_count));
    lines.push(String::new());

    lines.push("=".repeat(80));
    lines.push("                          DISSEMINATION METRICS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    let s = &report.summary;
    let time_ms = Distribution {
        mean: s.total_nano_time.mean / 1e6,
        median: s.total_nano_time.median / 1e6,
        p95: s.total_nano_time.p95 / 1e6,
        max: s.total_nano_time.max / 1e6,
    };
    push_distribution(&mut lines, "Time to last delivery", &time_ms, "ms");
    push_distribution(
        &mut lines,
        "Relative message redundancy (0 = optimal)",
        &s.relative_message_redundancy,
        "",
    );
    push_distribution(&mut lines, "Last delivery hop", &s.last_delivery_hop, "");

    if let Some(ref slowest) = s.slowest_message {
        lines.push(format!("Slowest message: {}", slowest));
        lines.push(String::new());
    }

    if !report.metrics.is_empty() {
        lines.push("Per-message metrics:".to_string());
        lines.push(format!(
            "  {:<24} {:>16} {:>8} {:>5} {:>8} {:>6}",
            "message", "total_ns", "rmr", "hops", "records", "hosts"
        ));
        for m in &report.metrics {
            lines.push(format!(
                "  {:<24} {:>16} {:>8.3} {:>5} {:>8} {:>6}",
                m.message_id,
                m.total_nano_time,
                m.relative_message_redundancy,
                m.last_delivery_hop,
                m.record_count,
                m.unique_hosts
            ));
        }
        lines.push(String::new());
    }

    // Footer
    lines.push("=".repeat(80));

    lines.join("\n")
}

/// Generate human-readable text report
pub fn generate_text_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let content = render_text_report(report);
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &AnalysisReport) {
    let s = &report.summary;
    println!("\n=== GOSSIP DISSEMINATION SUMMARY ===\n");
    println!("Messages: {}", s.message_count);
    println!("Deliveries: {}", s.total_deliveries);
    println!(
        "Time to last delivery: mean {:.2}ms, p95 {:.2}ms",
        s.total_nano_time.mean / 1e6,
        s.total_nano_time.p95 / 1e6
    );
    println!(
        "RMR: mean {:.3}, max {:.3}",
        s.relative_message_redundancy.mean, s.relative_message_redundancy.max
    );
    println!(
        "Last delivery hop: mean {:.1}, max {}",
        s.last_delivery_hop.mean, s.last_delivery_hop.max
    );
    println!();
}
