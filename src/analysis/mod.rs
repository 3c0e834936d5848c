//! Measurement log analysis for Datahop runs.
//!
//! This module loads harness logs and flattens them into chart-ready series
//! covering discovery delays, link quality, download speed and battery use.

pub mod types;
pub mod loader;
pub mod connectivity;
pub mod transfer;
pub mod battery;
pub mod summary;
pub mod report;

pub use types::*;
pub use loader::{load_battery, load_matrix, LoadError};
pub use connectivity::{ble_to_ipfs, ble_to_wifi, rssi_speed};
pub use transfer::download_speed;
pub use battery::battery_consumption;
pub use summary::{BatterySummary, MatrixSummary};
pub use report::{export_series_json, print_summary};
