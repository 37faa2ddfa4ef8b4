//! Dissemination analysis CLI for gossip host message logs.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use env_logger::Env;
use log::info;

use gossip_metrics::analysis::{self, AnalysisReport, LogLineParser, Pipeline, PropagationGraph};
use gossip_metrics::config::Config;
use gossip_metrics::config_loader::{self, CliOverrides};

/// Dissemination metrics for gossip-protocol network logs
#[derive(Parser, Debug)]
#[command(name = "gossip-metrics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the captured message log
    log_file: PathBuf,

    /// Path to an analysis configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Marker identifying message log lines
    #[arg(short, long)]
    marker: Option<String>,

    /// Output directory for reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Compute metrics on a single thread
    #[arg(long)]
    sequential: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Compute per-message metrics and write reports
    Analyze {
        /// Include per-message metrics in the reports
        #[arg(long)]
        detailed: bool,
    },

    /// Print summary statistics only
    Summary,

    /// Print the reconstructed forwarding chains of one message
    Paths {
        /// Message id to inspect
        message_id: String,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            marker: self.marker.clone(),
            output_dir: self.output.clone(),
            threads: self.threads,
            sequential: self.sequential,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let config = config_loader::resolve_config(cli.config.as_deref(), &cli.overrides())?;

    if config.parallel && config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let pipeline = Pipeline::new(LogLineParser::new(config.marker.clone()))
        .with_parallel(config.parallel);

    match cli.command {
        Commands::Analyze { detailed } => run_analysis(&cli.log_file, &config, &pipeline, detailed)?,
        Commands::Summary => {
            let analysis = pipeline
                .analyze_file(&cli.log_file)
                .with_context(|| format!("Failed to analyze {}", cli.log_file.display()))?;
            let report = AnalysisReport::new(&cli.log_file, &config.marker, analysis, false);
            analysis::report::print_summary(&report);
        }
        Commands::Paths { message_id } => print_paths(&cli.log_file, &pipeline, &message_id)?,
    }

    Ok(())
}

fn run_analysis(
    log_file: &Path,
    config: &Config,
    pipeline: &Pipeline,
    detailed: bool,
) -> Result<()> {
    info!("Analyzing {}", log_file.display());
    let analysis = pipeline
        .analyze_file(log_file)
        .with_context(|| format!("Failed to analyze {}", log_file.display()))?;

    let report = AnalysisReport::new(log_file, &config.marker, analysis, detailed);

    let output_dir = &config.output.dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    if config.output.json {
        analysis::generate_json_report(&report, &output_dir.join("dissemination_report.json"))?;
    }
    if config.output.text {
        analysis::generate_text_report(&report, &output_dir.join("dissemination_report.txt"))?;
    }

    analysis::report::print_summary(&report);
    info!("Analysis complete. Reports written to {}", output_dir.display());
    Ok(())
}

fn print_paths(log_file: &Path, pipeline: &Pipeline, message_id: &str) -> Result<()> {
    let (records, _) = pipeline
        .parser()
        .parse_log_file(log_file)
        .with_context(|| format!("Failed to read {}", log_file.display()))?;

    let group = analysis::into_groups(records.into_iter().filter(|r| r.message_id == message_id))
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("Message {} not found in {}", message_id, log_file.display()))?;

    let graph = PropagationGraph::from_group(&group);
    let paths = graph.delivery_paths()?;

    println!("\n=== FORWARDING CHAINS FOR {} ===\n", message_id);
    println!("Originator: {}", graph.originator().unwrap_or("-"));
    println!("Deliveries: {}", group.len());
    for path in &paths {
        println!("  {} ({} hops)", path.join(" -> "), path.len() - 1);
    }
    println!("\nLongest chain: {}", graph.longest_chain()?.join(" -> "));
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["gossip-metrics", "hosts.log", "analyze"]);

        assert_eq!(cli.log_file, PathBuf::from("hosts.log"));
        assert_eq!(cli.command, Commands::Analyze { detailed: false });
        assert_eq!(cli.log_level, "info");
        assert!(cli.config.is_none());
        assert!(!cli.sequential);
    }

    #[test]
    fn test_override_args() {
        let cli = Cli::parse_from([
            "gossip-metrics",
            "--marker",
            "MARKER,",
            "-o",
            "reports",
            "-j",
            "4",
            "--sequential",
            "hosts.log",
            "analyze",
            "--detailed",
        ]);

        let overrides = cli.overrides();
        assert_eq!(overrides.marker.as_deref(), Some("MARKER,"));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(overrides.threads, Some(4));
        assert!(overrides.sequential);
        assert_eq!(cli.command, Commands::Analyze { detailed: true });
    }

    #[test]
    fn test_paths_subcommand() {
        let cli = Cli::parse_from(["gossip-metrics", "hosts.log", "paths", "m1"]);
        assert_eq!(
            cli.command,
            Commands::Paths {
                message_id: "m1".to_string()
            }
        );
    }
}
