//! Headline counters for a rendered page.

use std::fmt;

use chrono::DateTime;

use super::battery::bucket_for;
use super::types::{Matrix, Measurement, UnixTime};

/// Summary of a connectivity/transfer matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixSummary {
    pub nodes: usize,
    pub alive_connections: usize,
    pub connection_successes: i64,
    pub connection_failures: i64,
    pub connection_attempts: usize,
    pub wifi_connections: usize,
    pub content_records: usize,
    pub total_bytes: i64,
    pub total_uptime: i64,
    pub first_download_at: Option<UnixTime>,
    pub last_download_at: Option<UnixTime>,
    /// Mean over contents with both download timestamps recorded
    pub mean_download_seconds: Option<f64>,
}

impl MatrixSummary {
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let mut summary = MatrixSummary {
            nodes: matrix.node_matrix.len(),
            content_records: matrix.content_matrix.len(),
            total_uptime: matrix.total_uptime,
            ..Default::default()
        };

        for node in matrix.node_matrix.values() {
            if node.connection_alive {
                summary.alive_connections += 1;
            }
            summary.connection_successes += node.connection_success_count;
            summary.connection_failures += node.connection_failure_count;
            summary.connection_attempts += node.connection_history.len();
            summary.wifi_connections += node
                .connection_history
                .iter()
                .filter(|c| c.wifi_connected())
                .count();
        }

        let mut durations = Vec::new();
        for content in matrix.content_matrix.values() {
            summary.total_bytes += content.size;
            durations.extend(content.download_duration());
            if content.download_started_at != 0 {
                summary.first_download_at = Some(
                    summary
                        .first_download_at
                        .map_or(content.download_started_at, |t| t.min(content.download_started_at)),
                );
            }
            if content.download_finished_at != 0 {
                summary.last_download_at = Some(
                    summary
                        .last_download_at
                        .map_or(content.download_finished_at, |t| t.max(content.download_finished_at)),
                );
            }
        }

        if !durations.is_empty() {
            let total: i64 = durations.iter().sum();
            summary.mean_download_seconds = Some(total as f64 / durations.len() as f64);
        }

        summary
    }
}

impl fmt::Display for MatrixSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {} ({} alive)", self.nodes, self.alive_connections)?;
        writeln!(
            f,
            "Connections: {} successful, {} failed, {} attempts ({} reached Wifi)",
            self.connection_successes,
            self.connection_failures,
            self.connection_attempts,
            self.wifi_connections
        )?;
        writeln!(
            f,
            "Content: {} records, {:.1} MB",
            self.content_records,
            self.total_bytes as f64 / (1024.0 * 1024.0)
        )?;
        writeln!(f, "Downloads: {} to {}", format_time(self.first_download_at), format_time(self.last_download_at))?;
        match self.mean_download_seconds {
            Some(mean) => writeln!(f, "Mean download time: {:.1}s", mean)?,
            None => writeln!(f, "Mean download time: -")?,
        }
        write!(f, "Uptime: {}", format_uptime(self.total_uptime))
    }
}

/// Summary of a battery measurement log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatterySummary {
    pub measurements: usize,
    pub per_bucket: Vec<(&'static str, usize)>,
    pub dropped: usize,
}

impl BatterySummary {
    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        let mut summary = BatterySummary {
            measurements: measurements.len(),
            ..Default::default()
        };

        for measurement in measurements {
            match bucket_for(&measurement.data_transfer) {
                Some(name) => match summary.per_bucket.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => *count += 1,
                    None => summary.per_bucket.push((name, 1)),
                },
                None => summary.dropped += 1,
            }
        }

        summary
    }
}

impl fmt::Display for BatterySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measurements: {}", self.measurements)?;
        for (name, count) in &self.per_bucket {
            write!(f, ", {}: {}", name, count)?;
        }
        write!(f, ", dropped: {}", self.dropped)
    }
}

/// Format a unix timestamp as UTC, `-` when absent
pub fn format_time(timestamp: Option<UnixTime>) -> String {
    timestamp
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format seconds as `HhMMmSSs`
pub fn format_uptime(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}h{:02}m{:02}s", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}
