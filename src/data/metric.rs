use super::group::{group_records, Group, RowRef};
use super::model::{columns, SummaryRow};
use super::table::Table;
use crate::error::{PlotError, Result};

/// Scale a fraction to a percentage.
pub fn percent(fraction: f64) -> f64 {
    fraction * 100.0
}

// ---------------------------------------------------------------------------
// Per-hasher sweep curves
// ---------------------------------------------------------------------------

/// One hasher's rows, sorted by B, with the plotted metrics derived.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepCurve {
    pub hasher: String,
    /// Sweep axis, ascending.
    pub b: Vec<u32>,
    /// `mean_abs_rel_err` in percent.
    pub error_pct: Vec<f64>,
    /// `mean_sigma_over_e` in percent.
    pub sigma_pct: Vec<f64>,
    /// Parsed rows in the same order as `b`.
    pub rows: Vec<SummaryRow>,
}

impl SweepCurve {
    /// Parse an already sorted group of summary rows.
    pub fn from_group(group: &Group<RowRef<'_>>) -> Result<Self> {
        let rows = group
            .items
            .iter()
            .map(|row| SummaryRow::from_record(row.record, row.index))
            .collect::<Result<Vec<_>>>()?;
        Ok(SweepCurve {
            hasher: group.key.clone(),
            b: rows.iter().map(|r| r.b).collect(),
            error_pct: rows.iter().map(|r| percent(r.mean_abs_rel_err)).collect(),
            sigma_pct: rows.iter().map(|r| percent(r.mean_sigma_over_e)).collect(),
            rows,
        })
    }

    pub fn x(&self) -> Vec<f64> {
        self.b.iter().map(|&b| f64::from(b)).collect()
    }
}

// ---------------------------------------------------------------------------
// Theoretical reference curves
// ---------------------------------------------------------------------------

/// `1.04/sqrt(2^B)` and `1.3/sqrt(2^B)` in percent over the shared sweep axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurves {
    pub b: Vec<u32>,
    pub theory_104_pct: Vec<f64>,
    pub theory_13_pct: Vec<f64>,
}

impl ReferenceCurves {
    /// Read the theory columns once, from the first curve.
    ///
    /// The curves are only meaningful when every hasher swept the same B
    /// values, so any divergence is reported instead of drawing a shifted
    /// curve. Returns `None` when there are no curves.
    pub fn from_curves(curves: &[SweepCurve]) -> Result<Option<Self>> {
        let Some(first) = curves.first() else {
            return Ok(None);
        };
        if let Some(other) = curves.iter().find(|c| c.b != first.b) {
            return Err(PlotError::AxisMismatch {
                group: other.hasher.clone(),
                expected: first.b.clone(),
                found: other.b.clone(),
            });
        }
        Ok(Some(ReferenceCurves {
            b: first.b.clone(),
            theory_104_pct: first.rows.iter().map(|r| percent(r.theory_104)).collect(),
            theory_13_pct: first.rows.iter().map(|r| percent(r.theory_13)).collect(),
        }))
    }

    pub fn x(&self) -> Vec<f64> {
        self.b.iter().map(|&b| f64::from(b)).collect()
    }
}

// ---------------------------------------------------------------------------
// Whole summary table
// ---------------------------------------------------------------------------

/// Everything the sweep chart and report need from `b_analysis.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAnalysis {
    /// One curve per hasher, in order of first appearance.
    pub curves: Vec<SweepCurve>,
    pub reference: Option<ReferenceCurves>,
}

impl SweepAnalysis {
    /// Group by hasher, sort each group by B, derive percentages.
    pub fn from_table(table: &Table) -> Result<Self> {
        table.require_columns(&SummaryRow::COLUMNS)?;

        let mut groups = group_records(table, columns::HASHER)?;
        for group in &mut groups {
            group.sort_by_column(columns::B)?;
        }
        let curves = groups
            .iter()
            .map(SweepCurve::from_group)
            .collect::<Result<Vec<_>>>()?;
        let reference = ReferenceCurves::from_curves(&curves)?;

        Ok(SweepAnalysis { curves, reference })
    }
}
