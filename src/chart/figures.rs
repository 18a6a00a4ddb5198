use plotters::style::RGBColor;

use super::figure::{Band, Figure, LegendCorner, LineStyle, Panel, Series};
use crate::color::ColorMap;
use crate::data::metric::SweepAnalysis;
use crate::data::model::ExperimentSeries;

const BLUE: RGBColor = RGBColor(31, 119, 180);
const ORANGE: RGBColor = RGBColor(255, 127, 14);
const REFERENCE: RGBColor = RGBColor(0, 0, 0);

const STREAM_AXIS: &str = "Processed stream size (time t)";
const DISTINCT_AXIS: &str = "Distinct elements";

pub const THEORY_104_LABEL: &str = "1.04/sqrt(2^B)";
pub const THEORY_13_LABEL: &str = "1.3/sqrt(2^B)";

/// Estimate-vs-truth chart for one experiment table.
///
/// Top: exact `Ft0` and the estimate `Nt`. Bottom: `E(Nt)` with the
/// `E(Nt) ± σ` band.
pub fn time_series_figure(title: &str, data: &ExperimentSeries) -> Figure {
    let x = &data.prefix_size;

    let mut comparison = Panel::new("Nt estimate vs exact Ft0", STREAM_AXIS, DISTINCT_AXIS);
    comparison.series = vec![
        Series::line("Exact Ft0", x.clone(), data.ft0_exact.clone(), BLUE),
        Series::line("Estimate Nt", x.clone(), data.nt_estimate.clone(), ORANGE),
    ];

    let mut stats = Panel::new("Estimate statistics", STREAM_AXIS, DISTINCT_AXIS);
    stats.series = vec![Series::line("E(Nt)", x.clone(), data.mean_nt.clone(), BLUE)];
    stats.bands = vec![Band {
        label: "E(Nt) ± σNt".to_string(),
        x: x.clone(),
        lower: data.lower_nt.clone(),
        upper: data.upper_nt.clone(),
        color: ORANGE,
        opacity: 0.25,
    }];

    Figure {
        title: title.to_string(),
        panels: vec![comparison, stats],
    }
}

/// Error and deviation against B, one line per hasher.
///
/// The theoretical bounds are added once, to the bottom panel only.
pub fn sweep_figure(analysis: &SweepAnalysis) -> Figure {
    let hashers: Vec<&str> = analysis.curves.iter().map(|c| c.hasher.as_str()).collect();
    let colors = ColorMap::new(&hashers);

    // Errors fall as B grows, so the upper right stays clear of the lines.
    let mut error = Panel::new("Mean relative error vs B", "B", "Mean error, %")
        .with_legend(LegendCorner::UpperRight);
    let mut sigma = Panel::new("Relative deviation vs B", "B", "Mean σ/E, %")
        .with_legend(LegendCorner::UpperRight);

    for curve in &analysis.curves {
        let color = colors.color_for(&curve.hasher);
        error.series.push(
            Series::line(&curve.hasher, curve.x(), curve.error_pct.clone(), color).with_markers(),
        );
        sigma.series.push(
            Series::line(&curve.hasher, curve.x(), curve.sigma_pct.clone(), color).with_markers(),
        );
    }

    if let Some(reference) = &analysis.reference {
        sigma.series.push(
            Series::line(
                THEORY_104_LABEL,
                reference.x(),
                reference.theory_104_pct.clone(),
                REFERENCE,
            )
            .with_width(1.5)
            .with_style(LineStyle::Dashed),
        );
        sigma.series.push(
            Series::line(
                THEORY_13_LABEL,
                reference.x(),
                reference.theory_13_pct.clone(),
                REFERENCE,
            )
            .with_width(1.5)
            .with_style(LineStyle::Dotted),
        );
    }

    Figure {
        title: "HyperLogLog analysis by B".to_string(),
        panels: vec![error, sigma],
    }
}
