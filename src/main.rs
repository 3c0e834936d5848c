use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use datahop_charts::analysis::print_summary;
use datahop_charts::config_loader::{self, CliOverrides};
use datahop_charts::orchestrator::{self, RenderOptions};
use datahop_charts::server;

/// Render Datahop measurement logs as HTML charts and serve them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the <name>.log files
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Output directory for rendered pages
    #[arg(long)]
    html_dir: Option<PathBuf>,

    /// Address for the static file server
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Render pages and exit without serving them
    #[arg(long)]
    no_serve: bool,

    /// Print a summary of every page to stdout
    #[arg(long)]
    summary: bool,

    /// Also write the chart series of every page as JSON
    #[arg(long)]
    export_json: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            logs_dir: self.logs_dir.clone(),
            html_dir: self.html_dir.clone(),
            bind: self.bind.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logging comes up before a config error is reported
    let config = config_loader::resolve_config(args.config.as_deref(), &args.overrides());
    let level = match &config {
        Ok(config) => config.log_level.clone(),
        Err(_) => args.log_level.clone().unwrap_or_else(|| "info".to_string()),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    let config = config?;

    info!("Logs directory: {:?}", config.logs_dir);
    info!("Output directory: {:?}", config.html_dir);

    let options = RenderOptions {
        export_json: args.export_json,
    };
    let pages = orchestrator::render_all(&config, options)?;
    info!("Rendered {} pages", pages.len());

    if args.summary {
        for page in &pages {
            print_summary(&page.name, &page.summary);
        }
    }

    if args.no_serve {
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().wrap_err("Failed to start async runtime")?;
    runtime.block_on(server::serve(config.html_dir.clone(), &config.bind))
}
