//! Discovery and connection-setup metrics.
//!
//! All series walk the node matrix in node-id order. Running x-indices are
//! global across nodes and never reset per node.

use crate::chart::{LineSeries, ParallelSeries};

use super::types::Matrix;

/// Seconds from BLE discovery to a successful Wifi connection.
///
/// History entries that never reached Wifi are skipped, not counted as a
/// zero delay. Negative delays from inconsistent clocks pass through.
pub fn ble_to_wifi(matrix: &Matrix) -> LineSeries {
    let mut series = LineSeries::new("BLE to Wifi");
    for node in matrix.node_matrix.values() {
        for attempt in node.connection_history.iter().filter(|c| c.wifi_connected()) {
            series.push((attempt.wifi_connected_at - attempt.ble_discovered_at) as f64);
        }
    }
    log::debug!("BLE to Wifi: {} points", series.len());
    series
}

/// Recorded discovery delays from BLE discovery to IPFS connection
pub fn ble_to_ipfs(matrix: &Matrix) -> LineSeries {
    let mut series = LineSeries::new("BLE to IPFS");
    for node in matrix.node_matrix.values() {
        for &delay in &node.discovery_delays {
            series.push(delay as f64);
        }
    }
    log::debug!("BLE to IPFS: {} points", series.len());
    series
}

/// `(RSSI, Speed)` of every connection attempt
pub fn rssi_speed(matrix: &Matrix) -> ParallelSeries {
    let points: Vec<[i64; 2]> = matrix
        .node_matrix
        .values()
        .flat_map(|node| node.connection_history.iter())
        .map(|attempt| [attempt.rssi, attempt.speed])
        .collect();
    log::debug!("RSSI Speed: {} points", points.len());

    ParallelSeries {
        name: "RSSI Speed".to_string(),
        points,
    }
}
