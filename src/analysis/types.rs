//! Core data types for Datahop measurement logs.
//!
//! Field names follow the JSON emitted by the measurement harness. Missing
//! fields fall back to their zero value, and `null` reads as the zero value
//! wherever it appears: a scalar field, a collection, a list element or a map
//! value. Only a wrong value type for a known field fails to parse. Field
//! names are matched exactly.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Unix timestamp in seconds, 0 when the event was never reached
pub type UnixTime = i64;

/// Reads `null` as the default value
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a list whose elements may be `null`
pub(crate) fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Reads a map whose values may be `null`
fn nullable_values<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let entries: Option<BTreeMap<String, Option<T>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// Transfer statistics for a single content tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContentMatrix {
    #[serde(deserialize_with = "nullable")]
    pub tag: String,
    /// Content size in bytes
    #[serde(deserialize_with = "nullable")]
    pub size: i64,
    /// Average download speed in MB/s
    #[serde(deserialize_with = "nullable")]
    pub avg_speed: f32,
    #[serde(deserialize_with = "nullable")]
    pub download_started_at: UnixTime,
    #[serde(deserialize_with = "nullable")]
    pub download_finished_at: UnixTime,
    #[serde(deserialize_with = "nullable_items")]
    pub provided_by: Vec<String>,
}

impl ContentMatrix {
    /// Seconds between download start and finish, if both were recorded
    pub fn download_duration(&self) -> Option<i64> {
        if self.download_started_at == 0 || self.download_finished_at == 0 {
            return None;
        }
        Some(self.download_finished_at - self.download_started_at)
    }
}

/// One historical connection attempt to a discovered node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    #[serde(rename = "BLEDiscoveredAt", deserialize_with = "nullable")]
    pub ble_discovered_at: UnixTime,
    #[serde(rename = "WifiConnectedAt", deserialize_with = "nullable")]
    pub wifi_connected_at: UnixTime,
    #[serde(rename = "RSSI", deserialize_with = "nullable")]
    pub rssi: i64,
    #[serde(rename = "Speed", deserialize_with = "nullable")]
    pub speed: i64,
    #[serde(rename = "Frequency", deserialize_with = "nullable")]
    pub frequency: i64,
    #[serde(rename = "IPFSConnectedAt", deserialize_with = "nullable")]
    pub ipfs_connected_at: UnixTime,
    #[serde(rename = "DisconnectedAt", deserialize_with = "nullable")]
    pub disconnected_at: UnixTime,
}

impl ConnectionInfo {
    /// Whether the attempt got as far as a Wifi connection
    pub fn wifi_connected(&self) -> bool {
        self.wifi_connected_at != 0
    }
}

/// Aggregate counters and history for one discovered peer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveredNodeMatrix {
    #[serde(rename = "ConnectionAlive", deserialize_with = "nullable")]
    pub connection_alive: bool,
    #[serde(rename = "ConnectionSuccessCount", deserialize_with = "nullable")]
    pub connection_success_count: i64,
    #[serde(rename = "ConnectionFailureCount", deserialize_with = "nullable")]
    pub connection_failure_count: i64,
    #[serde(rename = "LastSuccessfulConnectionDuration", deserialize_with = "nullable")]
    pub last_successful_connection_duration: i64,
    #[serde(rename = "BLEDiscoveredAt", deserialize_with = "nullable")]
    pub ble_discovered_at: UnixTime,
    #[serde(rename = "WifiConnectedAt", deserialize_with = "nullable")]
    pub wifi_connected_at: UnixTime,
    #[serde(rename = "RSSI", deserialize_with = "nullable")]
    pub rssi: i64,
    #[serde(rename = "Speed", deserialize_with = "nullable")]
    pub speed: i64,
    #[serde(rename = "Frequency", deserialize_with = "nullable")]
    pub frequency: i64,
    #[serde(rename = "IPFSConnectedAt", deserialize_with = "nullable")]
    pub ipfs_connected_at: UnixTime,
    /// Seconds from BLE discovery to IPFS connection, one per completed connection
    #[serde(rename = "DiscoveryDelays", deserialize_with = "nullable_items")]
    pub discovery_delays: Vec<i64>,
    #[serde(rename = "ConnectionHistory", deserialize_with = "nullable_items")]
    pub connection_history: Vec<ConnectionInfo>,
}

/// Top-level record of a connectivity/transfer log.
///
/// Both maps are ordered by key so running chart indices are stable between
/// runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Matrix {
    #[serde(deserialize_with = "nullable_values")]
    pub content_matrix: BTreeMap<String, ContentMatrix>,
    #[serde(deserialize_with = "nullable_values")]
    pub node_matrix: BTreeMap<String, DiscoveredNodeMatrix>,
    /// Seconds the harness was running
    #[serde(deserialize_with = "nullable")]
    pub total_uptime: i64,
}

/// A single battery measurement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Measurement {
    /// Megabytes transferred, "10" or "100"
    #[serde(deserialize_with = "nullable")]
    pub data_transfer: String,
    /// Seconds between transfers
    #[serde(deserialize_with = "nullable")]
    pub transfer_interval: String,
    /// Battery percentage consumed, as decimal text
    #[serde(deserialize_with = "nullable")]
    pub battery_consumption: String,
}

/// Contents of a battery log: a plain JSON array of measurements
pub type BatteryMeasurements = Vec<Measurement>;
