mod app;
mod chart;
mod config;
mod data;
mod error;
mod pipeline;
mod regression;
mod state;
mod ui;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use chart::render::PlottersDriver;
use chart::ChartFormat;
use config::PipelineConfig;
use state::ViewerState;

/// Train, evaluate and plot the floor-sensor area regression.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Chart output format.
    #[arg(value_enum, default_value_t = ChartFormat::Png)]
    format: ChartFormat,

    /// JSON file overriding paths and plot settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the viewer window and wait for Enter instead.
    #[arg(long)]
    no_viewer: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PipelineConfig::load(cli.config.as_deref())?;

    let (_, metrics) = pipeline::train_evaluate_and_save(&config)?;
    pipeline::predict_sample(&config)?;
    let outcome = pipeline::plot_regression_chart(&config, &PlottersDriver::new(cli.format))?;

    if !cli.no_viewer {
        log::info!("showing chart...");
        let chart_path = outcome.path.clone();
        let state = ViewerState::new(outcome.chart, outcome.trend, metrics, outcome.path);
        match app::run_viewer(state) {
            Ok(()) => return Ok(()),
            Err(e) => log::warn!("{e:#}; chart remains at {}", chart_path.display()),
        }
    }

    println!("Press Enter to exit..");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
