//! Battery consumption grouped by transfer size.

use crate::chart::BarSeries;

use super::types::Measurement;

/// X categories of the battery chart.
///
/// These are fixed labels; `TransferInterval` is never read for placement.
pub const INTERVAL_CATEGORIES: [&str; 2] = ["40s", "120s"];

/// Transfer size buckets as `(DataTransfer value, series name)`
pub const TRANSFER_BUCKETS: [(&str, &str); 2] = [("10", "10Mb"), ("100", "100Mb")];

/// Series name for a `DataTransfer` value, if it belongs to a bucket
pub fn bucket_for(data_transfer: &str) -> Option<&'static str> {
    TRANSFER_BUCKETS
        .iter()
        .find(|(value, _)| *value == data_transfer)
        .map(|(_, name)| *name)
}

/// Battery consumption per transfer size, input order kept within a bucket.
///
/// Measurements with an unrecognised `DataTransfer` are dropped.
pub fn battery_consumption(measurements: &[Measurement]) -> BarSeries {
    let mut series: Vec<(String, Vec<String>)> = TRANSFER_BUCKETS
        .iter()
        .map(|(_, name)| (name.to_string(), Vec::new()))
        .collect();

    let mut dropped = 0usize;
    for measurement in measurements {
        let bucket = bucket_for(&measurement.data_transfer)
            .and_then(|name| series.iter_mut().find(|(n, _)| n == name));
        match bucket {
            Some((_, values)) => values.push(measurement.battery_consumption.clone()),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {} battery measurements with unknown transfer size", dropped);
    }

    BarSeries {
        categories: INTERVAL_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        series,
    }
}
