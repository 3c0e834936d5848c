//! Log file loading.
//!
//! Each log is a single JSON document at `<logs_dir>/<name>.log`. Loading is
//! a single attempt: a missing file or a structurally invalid document is
//! returned as an error and never retried.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{nullable_items, BatteryMeasurements, Matrix, Measurement};

/// Battery log body; `null` elements read as empty measurements
#[derive(Default, Deserialize)]
#[serde(transparent)]
struct BatteryLog(#[serde(deserialize_with = "nullable_items")] Vec<Measurement>);

/// Errors that can occur while loading a log file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse log file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Location of the log file for a page name
pub fn log_path(logs_dir: &Path, name: &str) -> PathBuf {
    logs_dir.join(format!("{}.log", name))
}

/// A `null` document reads as the empty record
fn load_json<T: DeserializeOwned + Default>(logs_dir: &Path, name: &str) -> Result<T, LoadError> {
    let path = log_path(logs_dir, name);
    log::debug!("Reading log file {}", path.display());

    let bytes = fs::read(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;

    serde_json::from_slice::<Option<T>>(&bytes)
        .map(Option::unwrap_or_default)
        .map_err(|source| LoadError::Parse { path, source })
}

/// Load a connectivity/transfer matrix log
pub fn load_matrix(logs_dir: &Path, name: &str) -> Result<Matrix, LoadError> {
    let matrix: Matrix = load_json(logs_dir, name)?;
    log::info!(
        "Loaded {}: {} nodes, {} content records",
        name,
        matrix.node_matrix.len(),
        matrix.content_matrix.len()
    );
    Ok(matrix)
}

/// Load a battery measurement log
pub fn load_battery(logs_dir: &Path, name: &str) -> Result<BatteryMeasurements, LoadError> {
    let BatteryLog(measurements) = load_json(logs_dir, name)?;
    log::info!("Loaded {}: {} battery measurements", name, measurements.len());
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, name: &str, content: &str) {
        fs::write(log_path(dir.path(), name), content).unwrap();
    }

    #[test]
    fn test_log_path() {
        assert_eq!(
            log_path(Path::new("logs"), "zero_host_downloader"),
            PathBuf::from("logs/zero_host_downloader.log")
        );
    }

    #[test]
    fn test_load_matrix() {
        let dir = TempDir::new().unwrap();
        write_log(
            &dir,
            "page",
            r#"{"NodeMatrix": {"a": {"DiscoveryDelays": [1]}}, "TotalUptime": 10}"#,
        );

        let matrix = load_matrix(dir.path(), "page").unwrap();
        assert_eq!(matrix.node_matrix.len(), 1);
        assert_eq!(matrix.total_uptime, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_matrix(dir.path(), "absent").unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert_eq!(path, dir.path().join("absent.log")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "page", r#"{"ContentMatrix": {"t": {"AvgSpeed": "3.2"}}}"#);
        let err = load_matrix(dir.path(), "page").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_battery_must_be_a_list() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "battery", r#"{"DataTransfer": "10"}"#);
        assert!(matches!(
            load_battery(dir.path(), "battery"),
            Err(LoadError::Parse { .. })
        ));

        write_log(&dir, "battery", r#"[{"DataTransfer": "10", "BatteryConsumption": "2"}]"#);
        assert_eq!(load_battery(dir.path(), "battery").unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(log_path(dir.path(), "page"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            load_matrix(dir.path(), "page"),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_speed_and_frequency_beyond_i32() {
        let dir = TempDir::new().unwrap();
        write_log(
            &dir,
            "page",
            r#"{"NodeMatrix":{"a":{"ConnectionHistory":[{"BLEDiscoveredAt":1,"WifiConnectedAt":2,
                "RSSI":-50,"Speed":3000000000,"Frequency":2147483648}]}}}"#,
        );

        let matrix = load_matrix(dir.path(), "page").unwrap();
        let attempt = matrix.node_matrix["a"].connection_history[0];
        assert_eq!(attempt.speed, 3_000_000_000);
        assert_eq!(attempt.frequency, 2_147_483_648);
    }

    #[test]
    fn test_null_document_and_elements() {
        let dir = TempDir::new().unwrap();
        write_log(&dir, "page", "null");
        assert_eq!(load_matrix(dir.path(), "page").unwrap(), Matrix::default());

        write_log(&dir, "battery", r#"[null, {"DataTransfer": "100", "BatteryConsumption": null}]"#);
        let measurements = load_battery(dir.path(), "battery").unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0], Measurement::default());
        assert_eq!(measurements[1].data_transfer, "100");
        assert_eq!(measurements[1].battery_consumption, "");
    }
}
