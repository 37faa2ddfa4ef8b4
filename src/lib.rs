//! # gossip-metrics - Dissemination metrics for gossip-protocol networks
//!
//! Every host in an instrumented gossip network logs one line per message it
//! receives, naming the sender. This library reads such a captured log and
//! measures how efficiently each message spread through the network.
//!
//! ## Overview
//!
//! For every message id the pipeline:
//!
//! - **Parses** marked log lines into delivery records
//! - **Groups** records by message id and sorts them by timestamp
//! - **Reconstructs** the sender to recipient forwarding graph from the originator
//! - **Measures** time to last delivery, relative message redundancy (RMR)
//!   and the hop count of the longest forwarding chain
//!
//! ## Architecture
//!
//! - `analysis`: parsing, grouping, propagation graphs, metrics, reports
//! - `config`: analysis configuration structures and validation
//! - `config_loader`: YAML configuration loading and CLI overrides
//!
//! ## Log Line Format
//!
//! A relevant line contains the marker (default `GOSSIP_MESSAGE_LOG,`)
//! followed by six comma-separated fields:
//!
//! ```text
//! GOSSIP_MESSAGE_LOG,<host_id>,<sender_id>,<message_id>,<seq_no>,<nano_time>,<seq>
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gossip_metrics::analysis::{LogLineParser, Pipeline};
//!
//! let pipeline = Pipeline::new(LogLineParser::default());
//! let metrics = pipeline.run_file(Path::new("hosts.log"))?;
//! for metric in &metrics {
//!     println!("{}: rmr={:.2} hops={}", metric.message_id,
//!         metric.relative_message_redundancy, metric.last_delivery_hop);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The analysis pipeline returns structured `AnalysisError` values and does
//! not log failures itself. Configuration loading and report generation use
//! `color_eyre` for error reporting with context.

pub mod analysis;
pub mod config;
pub mod config_loader;
