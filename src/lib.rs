//! # datahop-charts - Chart reports for Datahop measurement runs
//!
//! This library turns the JSON logs written by the Datahop measurement
//! harness into static HTML chart pages and serves them locally.
//!
//! ## Overview
//!
//! Every run goes through the same steps for each configured log:
//! **Load → Aggregate → Render → Persist**. Once all pages are on disk the
//! output directory is served over HTTP until the process is stopped.
//!
//! ## Charts
//!
//! - **BLE to Wifi**: seconds from BLE discovery to a Wifi connection
//! - **BLE to IPFS**: recorded discovery delays up to the IPFS connection
//! - **RSSI Speed**: link quality against link speed for every attempt
//! - **Download Speed**: average speed per content tag
//! - **Battery Consumption**: battery use per transfer size
//!
//! ## Architecture
//!
//! - `analysis`: log record types, loading, metric aggregation, summaries
//! - `chart`: chart series, ECharts options and HTML pages
//! - `config` / `config_loader`: YAML configuration and CLI overrides
//! - `orchestrator`: the render pass over all configured pages
//! - `server`: static file server for the output directory
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use datahop_charts::{config::Config, orchestrator};
//!
//! let config = Config::default();
//! let pages = orchestrator::render_all(&config, orchestrator::RenderOptions::default())?;
//! for page in &pages {
//!     println!("{} -> {}", page.name, page.path.display());
//! }
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Loading and writing fail with typed errors (`LoadError`, `RenderError`);
//! the orchestrator wraps them with `color_eyre` context. Any failure ends
//! the run before the server starts.

pub mod analysis;
pub mod chart;
pub mod config;
pub mod config_loader;
pub mod orchestrator;
pub mod server;
