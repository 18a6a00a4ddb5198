//! # hll-plots
//!
//! Renders charts from the CSV tables of the HyperLogLog measurement stage.
//!
//! ```bash
//! # Tables in ./output, charts into ./plots
//! hll-plots --root .
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use hll_plots::run::run;
use hll_plots::{PlotConfig, PlotError};

/// Plot HyperLogLog experiment results
#[derive(Parser)]
#[command(name = "hll-plots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base directory holding `output/` and `plots/` (defaults to the crate directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Directory with the measurement CSV tables (default: <root>/output)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory charts are written to (default: <root>/plots)
    #[arg(long, value_name = "DIR")]
    plots_dir: Option<PathBuf>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> PlotConfig {
        let mut config = match &self.root {
            Some(root) => PlotConfig::with_root(root),
            None => PlotConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.plots_dir {
            config.plots_dir = dir.clone();
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = cli.config();
    let mut header_printed = false;
    let result = run(&config, |path| {
        if !header_printed {
            println!("Saved files:");
            header_printed = true;
        }
        println!("{}", path.display());
    });
    if let Err(e) = &result {
        if let Some(no_input @ PlotError::NoInput { .. }) = e.downcast_ref::<PlotError>() {
            eprintln!("{no_input}");
            return Ok(ExitCode::FAILURE);
        }
    }
    result?;
    Ok(ExitCode::SUCCESS)
}
