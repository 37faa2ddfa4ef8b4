//! End-to-end pipeline: lines to records to groups to metrics.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rayon::prelude::*;

use super::aggregate::into_groups;
use super::error::AnalysisError;
use super::log_parser::LogLineParser;
use super::metrics::compute_metric;
use super::types::*;

/// Wires the parser, aggregator and metric calculator together
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    parser: LogLineParser,
    parallel: bool,
}

impl Pipeline {
    pub fn new(parser: LogLineParser) -> Self {
        Self {
            parser,
            parallel: false,
        }
    }

    /// Compute metrics for independent message groups on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn parser(&self) -> &LogLineParser {
        &self.parser
    }

    /// Run the pipeline over a line source and return one metric per message,
    /// ascending by message id
    pub fn run<R: BufRead>(&self, reader: R) -> Result<Vec<Metric>, AnalysisError> {
        Ok(self.analyze(reader)?.metrics)
    }

    /// Run the pipeline over a log file
    pub fn run_file(&self, path: &Path) -> Result<Vec<Metric>, AnalysisError> {
        Ok(self.analyze_file(path)?.metrics)
    }

    /// Like [`Pipeline::run`], also reporting line statistics
    pub fn analyze<R: BufRead>(&self, reader: R) -> Result<Analysis, AnalysisError> {
        let (records, line_stats) = self.parser.parse_reader(reader)?;
        let groups = into_groups(records);
        log::info!(
            "Computing metrics for {} messages from {} records",
            groups.len(),
            line_stats.relevant_lines
        );

        let metrics = self.compute_metrics(&groups)?;
        Ok(Analysis {
            line_stats,
            metrics,
        })
    }

    pub fn analyze_file(&self, path: &Path) -> Result<Analysis, AnalysisError> {
        log::info!("Reading message log {}", path.display());
        let file = File::open(path)?;
        self.analyze(BufReader::with_capacity(64 * 1024, file))
    }

    /// Compute metrics for sorted groups, failing with the error of the first
    /// failing group in message id order
    pub fn compute_metrics(&self, groups: &[MessageGroup]) -> Result<Vec<Metric>, AnalysisError> {
        if self.parallel {
            let results: Vec<Result<Metric, AnalysisError>> =
                groups.par_iter().map(compute_metric).collect();
            results.into_iter().collect()
        } else {
            groups.iter().map(compute_metric).collect()
        }
    }
}
