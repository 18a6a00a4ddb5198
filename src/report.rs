use tabled::settings::{Settings, Style};
use tabled::{Table, Tabled};

use crate::data::metric::{percent, SweepAnalysis};

/// One line of the sweep report.
#[derive(Tabled)]
struct SweepRecord {
    hasher: String,
    #[tabled(rename = "B")]
    b: u32,
    #[tabled(rename = "m")]
    m: String,
    #[tabled(rename = "mean err, %")]
    mean_err: String,
    #[tabled(rename = "max err, %")]
    max_err: String,
    #[tabled(rename = "mean σ/E, %")]
    mean_sigma: String,
    #[tabled(rename = "max σ/E, %")]
    max_sigma: String,
    #[tabled(rename = "1.04/√m, %")]
    theory_104: String,
    #[tabled(rename = "1.3/√m, %")]
    theory_13: String,
    #[tabled(rename = "σ/E ≤ 1.04/√m, %")]
    share_104: String,
    #[tabled(rename = "σ/E ≤ 1.3/√m, %")]
    share_13: String,
}

fn pct(fraction: f64) -> String {
    format!("{:.3}", percent(fraction))
}

fn optional_pct(fraction: Option<f64>) -> String {
    fraction.map(pct).unwrap_or_else(|| "-".to_string())
}

/// Markdown table of every summary row, grouped by hasher and sorted by B.
pub fn sweep_report(analysis: &SweepAnalysis) -> String {
    let records: Vec<SweepRecord> = analysis
        .curves
        .iter()
        .flat_map(|curve| curve.rows.iter())
        .map(|row| SweepRecord {
            hasher: row.hasher.clone(),
            b: row.b,
            m: row
                .m
                .map(|m| format!("{m:.0}"))
                .unwrap_or_else(|| "-".to_string()),
            mean_err: pct(row.mean_abs_rel_err),
            max_err: optional_pct(row.max_abs_rel_err),
            mean_sigma: pct(row.mean_sigma_over_e),
            max_sigma: optional_pct(row.max_sigma_over_e),
            theory_104: pct(row.theory_104),
            theory_13: pct(row.theory_13),
            share_104: optional_pct(row.share_sigma_le_104),
            share_13: optional_pct(row.share_sigma_le_13),
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    let mut report = String::from("# HyperLogLog analysis by B\n\n");
    report.push_str(&Table::new(records).with(table_config).to_string());
    report.push('\n');
    report
}
