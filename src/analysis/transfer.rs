//! Content transfer metrics.

use crate::chart::LineSeries;

use super::types::Matrix;

/// Round a speed to one decimal digit for display.
///
/// The value is formatted and reparsed; a reparse failure reads as zero.
pub fn round_to_tenth(speed: f32) -> f64 {
    format!("{:.1}", speed).parse().unwrap_or(0.0)
}

/// Average download speed of every content record, in tag order
pub fn download_speed(matrix: &Matrix) -> LineSeries {
    let mut series = LineSeries::new("Download Speed");
    for content in matrix.content_matrix.values() {
        series.push(round_to_tenth(content.avg_speed));
    }
    log::debug!("Download Speed: {} points", series.len());
    series
}
