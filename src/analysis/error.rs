//! Errors produced by the dissemination pipeline.

/// Errors that can occur while turning a log capture into metrics
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Malformed log line '{line}': {reason}")]
    MalformedLogLine { line: String, reason: String },

    #[error("Message {message_id} has no log records")]
    EmptyGroup { message_id: String },

    #[error("Message {message_id} has {unique_hosts} unique host(s); at least 2 are required")]
    InsufficientParticipants {
        message_id: String,
        unique_hosts: usize,
    },

    #[error("Propagation graph of message {message_id} loops back to host {host}")]
    CyclicPropagationGraph { message_id: String, host: String },

    #[error("Failed to read log lines: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedLogLine {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
