//! Report orchestrator.
//!
//! This module drives the render pass: for each configured log it loads the
//! record, aggregates every metric, composes the page and writes it to the
//! output directory. Pages are rendered one at a time in configured order and
//! the first failure aborts the whole run.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use log::info;

use crate::analysis::{
    self, battery_consumption, ble_to_ipfs, ble_to_wifi, download_speed, rssi_speed,
    BatteryMeasurements, BatterySummary, Matrix, MatrixSummary,
};
use crate::chart::{self, Chart, Page};
use crate::config::Config;

pub const MATRIX_PAGE_TITLE: &str = "Datahop Matrix Charts";
pub const BATTERY_PAGE_TITLE: &str = "Datahop Battery Charts";
pub const INDEX_TITLE: &str = "Datahop Charts";

/// Shape of the record held by a log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Matrix,
    Battery,
}

/// A log to render, named by its file stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub name: String,
    pub kind: PageKind,
}

impl PageSpec {
    /// Page specs from the configuration, matrix pages first
    pub fn from_config(config: &Config) -> Vec<PageSpec> {
        let matrix = config.matrix_pages.iter().map(|name| PageSpec {
            name: name.clone(),
            kind: PageKind::Matrix,
        });
        let battery = config.battery_pages.iter().map(|name| PageSpec {
            name: name.clone(),
            kind: PageKind::Battery,
        });
        matrix.chain(battery).collect()
    }
}

/// Headline counters of a rendered page
#[derive(Debug, Clone, PartialEq)]
pub enum PageSummary {
    Matrix(MatrixSummary),
    Battery(BatterySummary),
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSummary::Matrix(summary) => write!(f, "{}", summary),
            PageSummary::Battery(summary) => write!(f, "{}", summary),
        }
    }
}

/// Outcome of rendering one page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub name: String,
    pub path: PathBuf,
    pub summary: PageSummary,
}

/// Switches for optional outputs
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub export_json: bool,
}

/// Charts of a connectivity/transfer matrix page
pub fn matrix_page(matrix: &Matrix) -> Page {
    let mut page = Page::new(MATRIX_PAGE_TITLE);
    page.add_chart(Chart::line(
        "Seconds from BLE discovery to Successful Wifi connection",
        "Seconds",
        ble_to_wifi(matrix),
    ))
    .add_chart(Chart::line(
        "Seconds from BLE discovery to Successful IPFS connection",
        "Seconds",
        ble_to_ipfs(matrix),
    ))
    .add_chart(Chart::rssi_speed("RSSI Speed", rssi_speed(matrix)))
    .add_chart(Chart::line("Download Speed", "MBps", download_speed(matrix)));
    page
}

/// Charts of a battery measurement page
pub fn battery_page(measurements: &BatteryMeasurements) -> Page {
    let mut page = Page::new(BATTERY_PAGE_TITLE);
    page.add_chart(Chart::bar(
        "Battery Consumption",
        "Percent",
        battery_consumption(measurements),
    ));
    page
}

/// Load, aggregate, render and write a single page
pub fn render_page(config: &Config, spec: &PageSpec, options: RenderOptions) -> Result<RenderedPage> {
    info!("Rendering page {}", spec.name);

    let (page, summary) = match spec.kind {
        PageKind::Matrix => {
            let matrix = analysis::load_matrix(&config.logs_dir, &spec.name)?;
            (matrix_page(&matrix), PageSummary::Matrix(MatrixSummary::from_matrix(&matrix)))
        }
        PageKind::Battery => {
            let measurements = analysis::load_battery(&config.logs_dir, &spec.name)?;
            (
                battery_page(&measurements),
                PageSummary::Battery(BatterySummary::from_measurements(&measurements)),
            )
        }
    };
    let page = page.with_asset_url(config.asset_url.clone());

    for chart in &page.charts {
        log::debug!("{}: '{}' has {} points", spec.name, chart.title(), chart.point_count());
    }

    let path = page.write(&config.html_dir, &spec.name)?;
    if options.export_json {
        analysis::export_series_json(&page, &config.html_dir, &spec.name)?;
    }

    Ok(RenderedPage {
        name: spec.name.clone(),
        path,
        summary,
    })
}

/// Render every configured page, then the index linking them.
///
/// Stops at the first page that fails to load or write.
pub fn render_all(config: &Config, options: RenderOptions) -> Result<Vec<RenderedPage>> {
    fs::create_dir_all(&config.html_dir).wrap_err_with(|| {
        format!("Failed to create output directory '{}'", config.html_dir.display())
    })?;

    let mut rendered = Vec::new();
    for spec in PageSpec::from_config(config) {
        let page = render_page(config, &spec, options)
            .wrap_err_with(|| format!("Page render failed: {}", spec.name))?;
        info!("{}: {}", page.name, page.summary.to_string().replace('\n', "; "));
        rendered.push(page);
    }

    let names: Vec<String> = rendered.iter().map(|page| page.name.clone()).collect();
    let index = chart::write_index(&config.html_dir, INDEX_TITLE, &names)?;
    info!("Index written to {}", index.display());

    Ok(rendered)
}
