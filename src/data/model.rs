use super::table::{parse_integer, parse_number, Record, Table};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Column names written by the measurement stage
// ---------------------------------------------------------------------------

pub mod columns {
    pub const PREFIX_SIZE: &str = "prefix_size";
    pub const FT0_EXACT: &str = "ft0_exact";
    pub const NT_ESTIMATE: &str = "nt_estimate";
    pub const MEAN_NT: &str = "mean_nt";
    pub const LOWER_NT: &str = "lower_nt";
    pub const UPPER_NT: &str = "upper_nt";

    pub const HASHER: &str = "hasher";
    pub const B: &str = "b";
    pub const M: &str = "m";
    pub const MEAN_ABS_REL_ERR: &str = "mean_abs_rel_err";
    pub const MAX_ABS_REL_ERR: &str = "max_abs_rel_err";
    pub const MEAN_SIGMA_OVER_E: &str = "mean_sigma_over_e";
    pub const MAX_SIGMA_OVER_E: &str = "max_sigma_over_e";
    pub const THEORY_104: &str = "theory_104";
    pub const THEORY_13: &str = "theory_13";
    pub const SHARE_SIGMA_LE_104: &str = "share_sigma_le_104";
    pub const SHARE_SIGMA_LE_13: &str = "share_sigma_le_13";
}

// ---------------------------------------------------------------------------
// ExperimentSeries – one `<hasher>_B<b>.csv` table
// ---------------------------------------------------------------------------

/// Numeric columns of a per-experiment table, all aligned by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSeries {
    /// Processed stream size at each step (x axis).
    pub prefix_size: Vec<f64>,
    /// Exact distinct count of the prefix.
    pub ft0_exact: Vec<f64>,
    /// Estimate from the first run.
    pub nt_estimate: Vec<f64>,
    /// Mean estimate across runs.
    pub mean_nt: Vec<f64>,
    /// `mean_nt - σ`.
    pub lower_nt: Vec<f64>,
    /// `mean_nt + σ`.
    pub upper_nt: Vec<f64>,
}

impl ExperimentSeries {
    pub const COLUMNS: [&'static str; 6] = [
        columns::PREFIX_SIZE,
        columns::FT0_EXACT,
        columns::NT_ESTIMATE,
        columns::MEAN_NT,
        columns::LOWER_NT,
        columns::UPPER_NT,
    ];

    /// Validate the header and extract every column up front.
    pub fn from_table(table: &Table) -> Result<Self> {
        table.require_columns(&Self::COLUMNS)?;
        Ok(ExperimentSeries {
            prefix_size: table.numeric_column(columns::PREFIX_SIZE)?,
            ft0_exact: table.numeric_column(columns::FT0_EXACT)?,
            nt_estimate: table.numeric_column(columns::NT_ESTIMATE)?,
            mean_nt: table.numeric_column(columns::MEAN_NT)?,
            lower_nt: table.numeric_column(columns::LOWER_NT)?,
            upper_nt: table.numeric_column(columns::UPPER_NT)?,
        })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.prefix_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix_size.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SummaryRow – one row of `b_analysis.csv`
// ---------------------------------------------------------------------------

/// One (hasher, B) measurement summary. Fractions are stored as written.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub hasher: String,
    pub b: u32,
    pub mean_abs_rel_err: f64,
    pub mean_sigma_over_e: f64,
    pub theory_104: f64,
    pub theory_13: f64,
    /// Register count `2^B`, if the table carries it.
    pub m: Option<f64>,
    pub max_abs_rel_err: Option<f64>,
    pub max_sigma_over_e: Option<f64>,
    pub share_sigma_le_104: Option<f64>,
    pub share_sigma_le_13: Option<f64>,
}

impl SummaryRow {
    pub const COLUMNS: [&'static str; 6] = [
        columns::HASHER,
        columns::B,
        columns::MEAN_ABS_REL_ERR,
        columns::MEAN_SIGMA_OVER_E,
        columns::THEORY_104,
        columns::THEORY_13,
    ];

    /// Parse a record; `row` is its index in the source table.
    pub fn from_record(record: &Record, row: usize) -> Result<Self> {
        let text = |column: &str| {
            record.get(column).ok_or_else(|| PlotError::Schema {
                column: column.to_string(),
                row,
            })
        };
        let number = |column: &str| parse_number(column, row, text(column)?);
        let optional = |column: &str| {
            record
                .get(column)
                .map(|raw| parse_number(column, row, raw))
                .transpose()
        };

        Ok(SummaryRow {
            hasher: text(columns::HASHER)?.to_string(),
            b: parse_integer(columns::B, row, text(columns::B)?)?,
            mean_abs_rel_err: number(columns::MEAN_ABS_REL_ERR)?,
            mean_sigma_over_e: number(columns::MEAN_SIGMA_OVER_E)?,
            theory_104: number(columns::THEORY_104)?,
            theory_13: number(columns::THEORY_13)?,
            m: optional(columns::M)?,
            max_abs_rel_err: optional(columns::MAX_ABS_REL_ERR)?,
            max_sigma_over_e: optional(columns::MAX_SIGMA_OVER_E)?,
            share_sigma_le_104: optional(columns::SHARE_SIGMA_LE_104)?,
            share_sigma_le_13: optional(columns::SHARE_SIGMA_LE_13)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::data::table::read_table_from;

    const EXPERIMENT: &str = "\
step_index,prefix_size,ft0_exact,nt_estimate,mean_nt,std_nt,lower_nt,upper_nt
0,1,1,1,1,1,0,2
1,2,2,2,2,1,1,3
2,3,3,2,3,1,2,4
";

    #[test]
    fn experiment_columns_are_aligned() {
        let table = read_table_from(EXPERIMENT.as_bytes(), Path::new("x_B4.csv")).unwrap();
        let series = ExperimentSeries::from_table(&table).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.nt_estimate, vec![1.0, 2.0, 2.0]);
        assert_eq!(series.upper_nt, vec![2.0, 3.0, 4.0]);
        for column in [&series.ft0_exact, &series.mean_nt, &series.lower_nt] {
            assert_eq!(column.len(), series.len());
        }
    }

    #[test]
    fn experiment_without_exact_column_fails_fast() {
        let text = "prefix_size,nt_estimate,mean_nt,lower_nt,upper_nt\n1,1,1,0,2\n";
        let table = read_table_from(text.as_bytes(), Path::new("x_B4.csv")).unwrap();
        match ExperimentSeries::from_table(&table).unwrap_err() {
            PlotError::MissingColumn { column, .. } => assert_eq!(column, columns::FT0_EXACT),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn summary_row_parses_optional_columns() {
        let record: Record = [
            ("hasher", "wyhash"),
            ("b", "8"),
            ("m", "256"),
            ("mean_abs_rel_err", "0.05"),
            ("mean_sigma_over_e", "0.06"),
            ("theory_104", "0.065"),
            ("theory_13", "0.08125"),
            ("share_sigma_le_13", "0.9"),
        ]
        .into_iter()
        .collect();

        let row = SummaryRow::from_record(&record, 3).unwrap();
        assert_eq!(row.hasher, "wyhash");
        assert_eq!(row.b, 8);
        assert_eq!(row.m, Some(256.0));
        assert_eq!(row.max_abs_rel_err, None);
        assert_eq!(row.share_sigma_le_13, Some(0.9));
    }

    #[test]
    fn summary_row_reports_its_row_index() {
        let record: Record = [("hasher", "h"), ("b", "x")].into_iter().collect();
        match SummaryRow::from_record(&record, 7).unwrap_err() {
            PlotError::Conversion { row, column, .. } => {
                assert_eq!(row, 7);
                assert_eq!(column, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
