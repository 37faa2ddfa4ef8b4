//! Dissemination analysis for gossip host message logs.
//!
//! This module turns a captured message log into per-message propagation
//! metrics: parsing, grouping, forwarding-graph reconstruction and metric
//! derivation, plus summary statistics and reports.

pub mod types;
pub mod error;
pub mod log_parser;
pub mod aggregate;
pub mod propagation;
pub mod metrics;
pub mod pipeline;
pub mod summary;
pub mod report;

pub use types::*;
pub use error::AnalysisError;
pub use log_parser::LogLineParser;
pub use aggregate::{aggregate, into_groups};
pub use propagation::{HopCounts, PropagationGraph};
pub use metrics::compute_metric;
pub use pipeline::Pipeline;
pub use summary::{summarize, MetricsSummary};
pub use report::{generate_json_report, generate_text_report, AnalysisReport};
