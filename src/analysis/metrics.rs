//! Per-message dissemination metrics.

use std::collections::BTreeSet;

use super::error::AnalysisError;
use super::propagation::PropagationGraph;
use super::types::*;

/// Elapsed time between the first and last record of a sorted group
pub fn total_nano_time(records: &[MessageLogRecord]) -> u64 {
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => first.nano_time.abs_diff(last.nano_time),
        _ => 0,
    }
}

/// Distinct hosts appearing as either sender or recipient
pub fn count_unique_hosts(records: &[MessageLogRecord]) -> usize {
    let mut hosts: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        hosts.insert(&record.host_id);
        hosts.insert(&record.sender_id);
    }
    hosts.len()
}

/// Relative message redundancy of a group.
///
/// `deliveries / (hosts - 1) - 1`. Fewer than two hosts leaves no minimum
/// delivery count to compare against.
pub fn relative_message_redundancy(group: &MessageGroup) -> Result<f32, AnalysisError> {
    let unique_hosts = count_unique_hosts(&group.records);
    rmr_from_counts(&group.message_id, group.len(), unique_hosts)
}

fn rmr_from_counts(
    message_id: &str,
    record_count: usize,
    unique_hosts: usize,
) -> Result<f32, AnalysisError> {
    if unique_hosts <= 1 {
        return Err(AnalysisError::InsufficientParticipants {
            message_id: message_id.to_string(),
            unique_hosts,
        });
    }

    Ok((record_count as f32 / (unique_hosts - 1) as f32) - 1.0)
}

/// Compute all metrics for a time-sorted message group
pub fn compute_metric(group: &MessageGroup) -> Result<Metric, AnalysisError> {
    if group.is_empty() {
        return Err(AnalysisError::EmptyGroup {
            message_id: group.message_id.clone(),
        });
    }

    let unique_hosts = count_unique_hosts(&group.records);
    let relative_message_redundancy = rmr_from_counts(&group.message_id, group.len(), unique_hosts)?;
    let hops = PropagationGraph::from_group(group).hop_counts()?;

    Ok(Metric {
        message_id: group.message_id.clone(),
        total_nano_time: total_nano_time(&group.records),
        relative_message_redundancy,
        last_delivery_hop: hops.last_delivery_hop,
        enumerated_path_hop: hops.enumerated_path_hop,
        record_count: group.len(),
        unique_hosts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(message_id: &str, edges: &[(&str, &str, i64)]) -> MessageGroup {
        MessageGroup {
            message_id: message_id.to_string(),
            records: edges
                .iter()
                .map(|(sender, host, t)| MessageLogRecord {
                    host_id: host.to_string(),
                    sender_id: sender.to_string(),
                    message_id: message_id.to_string(),
                    seq_no: 0,
                    nano_time: *t,
                    seq: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_total_nano_time() {
        let g = group("m1", &[("A", "B", 100), ("B", "C", 350), ("A", "C", 1100)]);
        assert_eq!(total_nano_time(&g.records), 1000);
        assert_eq!(total_nano_time(&[]), 0);
    }

    #[test]
    fn test_total_nano_time_spans_full_i64_range() {
        let g = group("m1", &[("A", "B", -10), ("B", "C", i64::MAX)]);
        assert_eq!(total_nano_time(&g.records), i64::MAX as u64 + 10);

        let g = group("m1", &[("A", "B", i64::MIN), ("B", "C", i64::MAX)]);
        assert_eq!(total_nano_time(&g.records), u64::MAX);
    }

    #[test]
    fn test_rmr_four_records_three_hosts() {
        let g = group("m1", &[("A", "B", 1), ("A", "C", 2), ("B", "C", 3), ("C", "B", 4)]);
        assert_eq!(count_unique_hosts(&g.records), 3);
        let rmr = relative_message_redundancy(&g).unwrap();
        assert!((rmr - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rmr_optimal_tree_is_zero() {
        let g = group("m1", &[("A", "B", 1), ("A", "C", 2), ("C", "D", 3)]);
        let rmr = relative_message_redundancy(&g).unwrap();
        assert!(rmr.abs() < f32::EPSILON);
    }

    #[test]
    fn test_rmr_requires_two_hosts() {
        let g = group("lonely", &[("A", "A", 1), ("A", "A", 2)]);
        match relative_message_redundancy(&g) {
            Err(AnalysisError::InsufficientParticipants {
                message_id,
                unique_hosts,
            }) => {
                assert_eq!(message_id, "lonely");
                assert_eq!(unique_hosts, 1);
            }
            other => panic!("expected InsufficientParticipants, got {:?}", other),
        }
        assert!(matches!(
            rmr_from_counts("none", 0, 0),
            Err(AnalysisError::InsufficientParticipants { unique_hosts: 0, .. })
        ));
    }

    #[test]
    fn test_empty_group_rejected() {
        let g = group("m9", &[]);
        assert!(matches!(
            compute_metric(&g),
            Err(AnalysisError::EmptyGroup { ref message_id }) if message_id == "m9"
        ));
    }

    #[test]
    fn test_compute_metric_chain() {
        let g = group("m1", &[("A", "B", 10), ("B", "C", 20), ("C", "D", 40)]);
        let metric = compute_metric(&g).unwrap();
        assert_eq!(metric.message_id, "m1");
        assert_eq!(metric.total_nano_time, 30);
        assert_eq!(metric.last_delivery_hop, 3);
        assert_eq!(metric.enumerated_path_hop, 0);
        assert_eq!(metric.record_count, 3);
        assert_eq!(metric.unique_hosts, 4);
        assert!(metric.relative_message_redundancy.abs() < f32::EPSILON);
    }

    #[test]
    fn test_compute_metric_single_record() {
        let g = group("m1", &[("A", "B", 10)]);
        let metric = compute_metric(&g).unwrap();
        assert_eq!(metric.total_nano_time, 0);
        assert_eq!(metric.last_delivery_hop, 1);
        assert!(metric.relative_message_redundancy.abs() < f32::EPSILON);
    }

    #[test]
    fn test_compute_metric_propagates_cycle() {
        let g = group("m1", &[("A", "B", 1), ("B", "A", 2)]);
        assert!(matches!(
            compute_metric(&g),
            Err(AnalysisError::CyclicPropagationGraph { .. })
        ));
    }
}
