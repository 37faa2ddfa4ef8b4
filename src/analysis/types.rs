//! Core data types for dissemination analysis.

use serde::{Deserialize, Serialize};

/// Default marker identifying a message-delivery log line.
///
/// The trailing comma is part of the marker, so removing it leaves exactly
/// the six record fields.
pub const LOG_LINE_LEADER: &str = "GOSSIP_MESSAGE_LOG,";

/// Number of comma-separated fields in a message-delivery log line
pub const LOG_LINE_FIELDS: usize = 6;

/// One observed delivery of a gossiped message at a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLogRecord {
    /// Host that received and logged the message
    pub host_id: String,
    /// Host that sent the message to `host_id`
    pub sender_id: String,
    pub message_id: String,
    /// Global sequence number carried by the message
    pub seq_no: u64,
    /// Receiver's local clock, nanoseconds since epoch
    pub nano_time: i64,
    /// Local per-host sequence number
    pub seq: i64,
}

impl MessageLogRecord {
    /// True when a host logged its own message (sender and recipient coincide)
    pub fn is_self_delivery(&self) -> bool {
        self.sender_id == self.host_id
    }
}

/// All records of one message, sorted by `nano_time` ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageGroup {
    pub message_id: String,
    pub records: Vec<MessageLogRecord>,
}

impl MessageGroup {
    /// Earliest record of the group
    pub fn origin(&self) -> Option<&MessageLogRecord> {
        self.records.first()
    }

    /// Sender of the earliest record
    pub fn originator(&self) -> Option<&str> {
        self.origin().map(|r| r.sender_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Dissemination metrics for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub message_id: String,
    /// Time between the earliest and latest delivery
    pub total_nano_time: u64,
    /// RMR: deliveries over the minimum needed to reach every host, minus one
    pub relative_message_redundancy: f32,
    /// Forwarding hops in the longest chain from the originator
    pub last_delivery_hop: usize,
    /// Longest path produced by leaf-dropping path enumeration.
    ///
    /// Enumeration only emits a path through hosts that forwarded further,
    /// so terminal deliveries never contribute and the value is 0 for any
    /// acyclic propagation graph. Kept alongside `last_delivery_hop` for
    /// comparison with earlier tooling.
    pub enumerated_path_hop: usize,
    pub record_count: usize,
    pub unique_hosts: usize,
}

/// Line accounting for one pass over a line source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub lines_read: usize,
    pub relevant_lines: usize,
    pub irrelevant_lines: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub line_stats: LineStats,
    /// One metric per message, ascending by message id
    pub metrics: Vec<Metric>,
}
