//! Report output besides the HTML pages.
//!
//! Exports the chart series of a page as JSON and prints page summaries.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::chart::{Chart, Page};

#[derive(Serialize)]
struct SeriesExport<'a> {
    title: &'a str,
    charts: &'a [Chart],
}

/// Write every chart's series of a page to `<html_dir>/<name>.json`
pub fn export_series_json(page: &Page, html_dir: &Path, name: &str) -> Result<PathBuf> {
    let export = SeriesExport {
        title: &page.title,
        charts: &page.charts,
    };
    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize chart series to JSON")?;

    let output_path = html_dir.join(format!("{}.json", name));
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write JSON series to {}", output_path.display()))?;

    log::info!("JSON series written to {}", output_path.display());
    Ok(output_path)
}

/// Print a page summary to stdout
pub fn print_summary(name: &str, summary: &impl std::fmt::Display) {
    println!("\n=== {} ===\n", name);
    println!("{}", summary);
}
