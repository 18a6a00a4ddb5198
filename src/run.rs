use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::chart::figures::{sweep_figure, time_series_figure};
use crate::chart::{render_to_file, Layout};
use crate::config::PlotConfig;
use crate::data::metric::SweepAnalysis;
use crate::data::model::ExperimentSeries;
use crate::data::table::read_table;
use crate::error::PlotError;
use crate::report::sweep_report;

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Experiment tables in `config.output_dir`, sorted by file name.
///
/// A missing directory counts as empty and yields [`PlotError::NoInput`].
pub fn discover_tables(config: &PlotConfig) -> Result<Vec<PathBuf>> {
    let mut tables = Vec::new();
    match fs::read_dir(&config.output_dir) {
        Ok(entries) => {
            for entry in entries {
                let entry =
                    entry.with_context(|| format!("listing {}", config.output_dir.display()))?;
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };
                if config.is_experiment_table(name) && entry.path().is_file() {
                    tables.push(entry.path());
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", config.output_dir.display());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("listing {}", config.output_dir.display()));
        }
    }
    tables.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if tables.is_empty() {
        return Err(PlotError::NoInput {
            dir: config.output_dir.clone(),
            pattern: config.pattern(),
        }
        .into());
    }
    info!("found {} tables in {}", tables.len(), config.output_dir.display());
    Ok(tables)
}

/// Chart title for a table: its file stem with underscores as spaces.
pub fn title_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Chart paths
// ---------------------------------------------------------------------------

/// Load one experiment table and write its time-series chart.
pub fn plot_experiment(csv_path: &Path, png_path: &Path, title: &str, layout: &Layout) -> Result<()> {
    let started = Instant::now();
    let table = read_table(csv_path)?;
    let series = ExperimentSeries::from_table(&table)
        .with_context(|| format!("reading {}", csv_path.display()))?;
    debug!("{}: {} steps", csv_path.display(), series.len());

    render_to_file(&time_series_figure(title, &series), layout, png_path)
        .with_context(|| format!("rendering {}", png_path.display()))?;
    debug!("{} rendered in {:?}", png_path.display(), started.elapsed());
    Ok(())
}

/// Load the summary table, write the sweep chart and return the analysis.
pub fn plot_sweep(summary_path: &Path, png_path: &Path, layout: &Layout) -> Result<SweepAnalysis> {
    let table = read_table(summary_path)?;
    let analysis = SweepAnalysis::from_table(&table)
        .with_context(|| format!("reading {}", summary_path.display()))?;
    info!(
        "{}: {} hashers over {} B values",
        summary_path.display(),
        analysis.curves.len(),
        analysis.reference.as_ref().map_or(0, |r| r.b.len())
    );

    render_to_file(&sweep_figure(&analysis), layout, png_path)
        .with_context(|| format!("rendering {}", png_path.display()))?;
    Ok(analysis)
}

// ---------------------------------------------------------------------------
// Whole run
// ---------------------------------------------------------------------------

/// Render every discovered table, then the sweep chart and report if the
/// summary table exists. `on_written` is called with each artifact path as
/// soon as it is on disk. Returns all written paths in order.
pub fn run(config: &PlotConfig, mut on_written: impl FnMut(&Path)) -> Result<Vec<PathBuf>> {
    let tables = discover_tables(config)?;

    fs::create_dir_all(&config.plots_dir)
        .with_context(|| format!("creating {}", config.plots_dir.display()))?;

    let mut written = Vec::new();
    let mut record = |path: PathBuf| {
        on_written(&path);
        written.push(path);
    };

    for csv_path in &tables {
        let stem = csv_path.file_stem().unwrap_or_default().to_string_lossy();
        let png_path = config.plots_dir.join(format!("{stem}.png"));
        plot_experiment(csv_path, &png_path, &title_for(csv_path), &config.layout)?;
        record(png_path);
    }

    let summary_path = config.summary_path();
    if summary_path.is_file() {
        let stem = Path::new(&config.summary_file)
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let png_path = config.plots_dir.join(format!("{stem}.png"));
        let analysis = plot_sweep(&summary_path, &png_path, &config.layout)?;
        record(png_path);

        let report_path = config.plots_dir.join(format!("{stem}.md"));
        fs::write(&report_path, sweep_report(&analysis))
            .with_context(|| format!("writing {}", report_path.display()))?;
        record(report_path);
    } else {
        debug!("no {} in {}", config.summary_file, config.output_dir.display());
    }

    Ok(written)
}
