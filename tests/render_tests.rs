#[cfg(test)]
mod render_tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use datahop_charts::analysis::{self, LoadError};
    use datahop_charts::config::Config;
    use datahop_charts::orchestrator::{self, PageSummary, RenderOptions};

    const MATRIX_LOG: &str = r#"{
        "ContentMatrix": {
            "QmContentA": {"Tag": "QmContentA", "Size": 10485760, "AvgSpeed": 3.14,
                           "DownloadStartedAt": 1620000000, "DownloadFinishedAt": 1620000004,
                           "ProvidedBy": ["peer-b"]},
            "QmContentB": {"Tag": "QmContentB", "Size": 104857600, "AvgSpeed": 1.26,
                           "DownloadStartedAt": 1620000100, "DownloadFinishedAt": 1620000180,
                           "ProvidedBy": null}
        },
        "NodeMatrix": {
            "peer-a": {
                "ConnectionAlive": true,
                "ConnectionSuccessCount": 1,
                "ConnectionFailureCount": 1,
                "DiscoveryDelays": [8],
                "ConnectionHistory": [
                    {"BLEDiscoveredAt": 100, "WifiConnectedAt": 105, "RSSI": -58, "Speed": 72,
                     "Frequency": 2437, "IPFSConnectedAt": 108, "DisconnectedAt": 160},
                    {"BLEDiscoveredAt": 200, "WifiConnectedAt": 0, "RSSI": -80, "Speed": 6}
                ]
            },
            "peer-b": {
                "DiscoveryDelays": [3, 12],
                "ConnectionHistory": [
                    {"BLEDiscoveredAt": 300, "WifiConnectedAt": 302, "RSSI": -47, "Speed": 144}
                ]
            }
        },
        "TotalUptime": 7200
    }"#;

    const BATTERY_LOG: &str = r#"[
        {"DataTransfer": "10", "TransferInterval": "40", "BatteryConsumption": "1.2"},
        {"DataTransfer": "100", "TransferInterval": "40", "BatteryConsumption": "4.8"},
        {"DataTransfer": "50", "TransferInterval": "40", "BatteryConsumption": "2.0"},
        {"DataTransfer": "10", "TransferInterval": "120", "BatteryConsumption": "0.7"}
    ]"#;

    fn workspace() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        fs::create_dir_all(&logs_dir).unwrap();

        let config = Config {
            logs_dir,
            html_dir: dir.path().join("html"),
            matrix_pages: vec!["zero_host_downloader".to_string()],
            battery_pages: vec!["battery_measurements".to_string()],
            ..Default::default()
        };
        (dir, config)
    }

    fn write_log(config: &Config, name: &str, content: &str) {
        fs::write(analysis::loader::log_path(&config.logs_dir, name), content).unwrap();
    }

    fn page_option(html: &str, index: usize) -> serde_json::Value {
        let marker = format!("let option_{} = ", index);
        let start = html.find(&marker).unwrap() + marker.len();
        let end = start + html[start..].find(";\n").unwrap();
        serde_json::from_str(&html[start..end].replace("<\\/", "</")).unwrap()
    }

    #[test]
    fn test_render_all_pages() {
        let (_dir, config) = workspace();
        write_log(&config, "zero_host_downloader", MATRIX_LOG);
        write_log(&config, "battery_measurements", BATTERY_LOG);

        let pages = orchestrator::render_all(&config, RenderOptions::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(config.html_dir.join("zero_host_downloader.html").exists());
        assert!(config.html_dir.join("battery_measurements.html").exists());
        assert!(config.html_dir.join("index.html").exists());
        assert!(!config.html_dir.join("zero_host_downloader.json").exists());

        match &pages[0].summary {
            PageSummary::Matrix(summary) => {
                assert_eq!(summary.nodes, 2);
                assert_eq!(summary.connection_attempts, 3);
                assert_eq!(summary.wifi_connections, 2);
            }
            other => panic!("unexpected summary {:?}", other),
        }
    }

    #[test]
    fn test_matrix_page_series() {
        let (_dir, config) = workspace();
        write_log(&config, "zero_host_downloader", MATRIX_LOG);
        write_log(&config, "battery_measurements", BATTERY_LOG);
        orchestrator::render_all(&config, RenderOptions::default()).unwrap();

        let html = fs::read_to_string(config.html_dir.join("zero_host_downloader.html")).unwrap();
        assert!(html.contains("<title>Datahop Matrix Charts</title>"));

        let wifi = page_option(&html, 0);
        assert_eq!(wifi["series"][0]["data"], serde_json::json!([5.0, 2.0]));
        assert_eq!(wifi["xAxis"]["data"], serde_json::json!([0, 1]));

        let ipfs = page_option(&html, 1);
        assert_eq!(ipfs["series"][0]["data"], serde_json::json!([8.0, 3.0, 12.0]));

        let rssi = page_option(&html, 2);
        assert_eq!(
            rssi["series"][0]["data"],
            serde_json::json!([[-58, 72], [-80, 6], [-47, 144]])
        );

        let speed = page_option(&html, 3);
        assert_eq!(speed["yAxis"]["name"], "MBps");
        assert_eq!(speed["series"][0]["data"], serde_json::json!([3.1, 1.3]));
    }

    #[test]
    fn test_battery_page_series() {
        let (_dir, config) = workspace();
        write_log(&config, "zero_host_downloader", MATRIX_LOG);
        write_log(&config, "battery_measurements", BATTERY_LOG);
        orchestrator::render_all(&config, RenderOptions::default()).unwrap();

        let html = fs::read_to_string(config.html_dir.join("battery_measurements.html")).unwrap();
        let option = page_option(&html, 0);
        assert_eq!(option["xAxis"]["data"], serde_json::json!(["40s", "120s"]));
        assert_eq!(option["series"][0]["name"], "10Mb");
        assert_eq!(option["series"][0]["data"], serde_json::json!([1.2, 0.7]));
        assert_eq!(option["series"][1]["name"], "100Mb");
        assert_eq!(option["series"][1]["data"], serde_json::json!([4.8]));
    }

    #[test]
    fn test_missing_log_aborts_without_page() {
        let (_dir, config) = workspace();
        write_log(&config, "battery_measurements", BATTERY_LOG);

        let err = orchestrator::render_all(&config, RenderOptions::default()).unwrap_err();
        let load_error = err.downcast_ref::<LoadError>().unwrap();
        assert!(matches!(load_error, LoadError::Io { .. }));

        assert!(!config.html_dir.join("zero_host_downloader.html").exists());
        // fail whole: later pages are never rendered
        assert!(!config.html_dir.join("battery_measurements.html").exists());
    }

    #[test]
    fn test_malformed_log_is_parse_error() {
        let (_dir, config) = workspace();
        write_log(
            &config,
            "zero_host_downloader",
            r#"{"ContentMatrix": {"QmContentA": {"AvgSpeed": "3.14"}}}"#,
        );

        let err = orchestrator::render_all(&config, RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Parse { .. })
        ));
        assert!(!config.html_dir.join("zero_host_downloader.html").exists());
    }

    #[test]
    fn test_export_json() {
        let (_dir, config) = workspace();
        write_log(&config, "zero_host_downloader", MATRIX_LOG);
        write_log(&config, "battery_measurements", BATTERY_LOG);

        let options = RenderOptions { export_json: true };
        orchestrator::render_all(&config, options).unwrap();

        let path = config.html_dir.join("zero_host_downloader.json");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["charts"].as_array().unwrap().len(), 4);
        assert_eq!(value["charts"][2]["kind"], "parallel");
    }

    #[test]
    fn test_log_path_layout() {
        assert_eq!(
            analysis::loader::log_path(Path::new("logs"), "five_client_uploader"),
            Path::new("logs/five_client_uploader.log")
        );
    }
}
