//! Aggregate statistics across the metrics of one run.

use serde::{Deserialize, Serialize};

use super::types::*;

/// Distribution of one metric across messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
    pub max: f64,
}

impl Distribution {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            p95: percentile(values, 95.0),
            max: values.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// Summary of all message metrics in a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub message_count: usize,
    pub total_deliveries: usize,
    pub total_nano_time: Distribution,
    pub relative_message_redundancy: Distribution,
    pub last_delivery_hop: Distribution,
    /// Message that took longest to reach its last host
    pub slowest_message: Option<String>,
}

/// Summarize per-message metrics
pub fn summarize(metrics: &[Metric]) -> MetricsSummary {
    let times: Vec<f64> = metrics.iter().map(|m| m.total_nano_time as f64).collect();
    let rmrs: Vec<f64> = metrics
        .iter()
        .map(|m| m.relative_message_redundancy as f64)
        .collect();
    let hops: Vec<f64> = metrics.iter().map(|m| m.last_delivery_hop as f64).collect();

    // Earliest message id wins ties, since metrics are ordered by id
    let slowest_message = metrics
        .iter()
        .fold(None::<&Metric>, |best, m| match best {
            Some(b) if b.total_nano_time >= m.total_nano_time => Some(b),
            _ => Some(m),
        })
        .map(|m| m.message_id.clone());

    MetricsSummary {
        message_count: metrics.len(),
        total_deliveries: metrics.iter().map(|m| m.record_count).sum(),
        total_nano_time: Distribution::from_values(&times),
        relative_message_redundancy: Distribution::from_values(&rmrs),
        last_delivery_hop: Distribution::from_values(&hops),
        slowest_message,
    }
}

/// Calculate mean of a slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate median of a slice
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Calculate percentile of a slice
fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: &str, time: u64, rmr: f32, hop: usize) -> Metric {
        Metric {
            message_id: id.to_string(),
            total_nano_time: time,
            relative_message_redundancy: rmr,
            last_delivery_hop: hop,
            enumerated_path_hop: 0,
            record_count: 4,
            unique_hosts: 3,
        }
    }

    #[test]
    fn test_summary_of_empty_run() {
        let summary = summarize(&[]);
        assert_eq!(summary.message_count, 0);
        assert_eq!(summary.total_nano_time, Distribution::default());
        assert!(summary.slowest_message.is_none());
    }

    #[test]
    fn test_summary_values() {
        let metrics = vec![
            metric("a", 100, 0.0, 1),
            metric("b", 300, 1.0, 3),
            metric("c", 200, 0.5, 2),
            metric("d", 300, 0.5, 2),
        ];
        let summary = summarize(&metrics);
        assert_eq!(summary.message_count, 4);
        assert_eq!(summary.total_deliveries, 16);
        assert_eq!(summary.total_nano_time.mean, 225.0);
        assert_eq!(summary.total_nano_time.median, 250.0);
        assert_eq!(summary.total_nano_time.max, 300.0);
        assert_eq!(summary.relative_message_redundancy.median, 0.5);
        assert_eq!(summary.last_delivery_hop.max, 3.0);
        assert_eq!(summary.slowest_message.as_deref(), Some("b"));
    }

    #[test]
    fn test_percentile() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        assert_eq!(percentile(&values, 95.0), 95.0);
        assert_eq!(percentile(&[7.0], 95.0), 7.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }
}
