use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Record – one row of a result table
// ---------------------------------------------------------------------------

/// A single row: column name → raw cell text, never type-converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Raw cell text for `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered rows of one file
// ---------------------------------------------------------------------------

/// Rows of one result file in file order, plus the header as written.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// File the rows were read from.
    pub source: PathBuf,
    /// Header columns in file order.
    pub columns: Vec<String>,
    /// Rows in file order.
    pub records: Vec<Record>,
}

impl Table {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the header lists `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with [`PlotError::MissingColumn`] unless every name is in the header.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(PlotError::MissingColumn {
                column: missing.to_string(),
                path: self.source.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Raw text of one cell.
    pub fn cell(&self, row: usize, column: &str) -> Result<&str> {
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .ok_or_else(|| PlotError::Schema {
                column: column.to_string(),
                row,
            })
    }

    /// Extract `column` as floats, one per row, in row order.
    ///
    /// All-or-nothing: the first missing or unparseable cell aborts the
    /// extraction, naming its row index and raw text.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>> {
        (0..self.records.len())
            .map(|row| parse_number(column, row, self.cell(row, column)?))
            .collect()
    }
}

/// Parse one decimal cell, surrounding whitespace ignored.
pub fn parse_number(column: &str, row: usize, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| conversion_error(column, row, raw))
}

/// Parse one integer cell, surrounding whitespace ignored.
pub fn parse_integer(column: &str, row: usize, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| conversion_error(column, row, raw))
}

fn conversion_error(column: &str, row: usize, raw: &str) -> PlotError {
    PlotError::Conversion {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Load a comma-separated table with a header row.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| PlotError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table_from(BufReader::new(file), path)?;
    log::debug!("{}: {} rows", path.display(), table.len());
    Ok(table)
}

/// Load a table from any reader; `source` is used for error messages.
///
/// Rows whose field count differs from the header are rejected, as is
/// text that is not valid UTF-8. A leading byte-order mark is dropped.
pub fn read_table_from<R: Read>(input: R, source: &Path) -> Result<Table> {
    let parse_err = |source_err: csv::Error| PlotError::Parse {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut records: Vec<Record> = Vec::new();
    for result in reader.records() {
        let row = result.map_err(parse_err)?;
        records.push(
            columns
                .iter()
                .zip(row.iter())
                .map(|(c, v)| (c.clone(), v.to_string()))
                .collect(),
        );
    }

    Ok(Table {
        source: source.to_path_buf(),
        columns,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        read_table_from(text.as_bytes(), Path::new("test.csv")).unwrap()
    }

    #[test]
    fn reads_header_and_rows_in_order() {
        let t = table("a,b\n1,x\n2,y\n3,z\n");
        assert_eq!(t.columns, vec!["a", "b"]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.records[0].get("b"), Some("x"));
        assert_eq!(t.records[2].get("a"), Some("3"));
        assert_eq!(t.records[1].len(), 2);
    }

    #[test]
    fn keeps_cells_as_raw_text() {
        let t = table("v\n007\n1e3\n");
        assert_eq!(t.cell(0, "v").unwrap(), "007");
        assert_eq!(t.cell(1, "v").unwrap(), "1e3");
    }

    #[test]
    fn strips_byte_order_mark() {
        let t = table("\u{feff}prefix_size,x\n1,2\n");
        assert!(t.has_column("prefix_size"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = read_table_from("a,b\n1,2\n3\n".as_bytes(), Path::new("r.csv")).unwrap_err();
        assert!(matches!(err, PlotError::Parse { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let err = read_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, PlotError::FileAccess { .. }));
    }

    #[test]
    fn numeric_column_matches_row_count() {
        let t = table("x,y\n1,0.5\n2, 1.25 \n3,-4\n");
        let y = t.numeric_column("y").unwrap();
        assert_eq!(y.len(), t.len());
        assert_eq!(y, vec![0.5, 1.25, -4.0]);
    }

    #[test]
    fn conversion_error_names_row_and_value() {
        let t = table("x\n1\n2\nabc\n4\n");
        match t.numeric_column("x").unwrap_err() {
            PlotError::Conversion { column, row, value } => {
                assert_eq!(column, "x");
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_cell_is_not_a_number() {
        let t = table("x,y\n1,\n");
        assert!(matches!(
            t.numeric_column("y"),
            Err(PlotError::Conversion { row: 0, .. })
        ));
    }

    #[test]
    fn absent_column_is_schema_error() {
        let t = table("x\n1\n");
        assert!(matches!(
            t.numeric_column("nope"),
            Err(PlotError::Schema { row: 0, .. })
        ));
        assert!(matches!(
            t.require_columns(&["x", "nope"]),
            Err(PlotError::MissingColumn { .. })
        ));
    }

    #[test]
    fn integer_cells_reject_fractions() {
        assert_eq!(parse_integer("b", 0, " 8 ").unwrap(), 8);
        assert!(matches!(
            parse_integer("b", 3, "4.5"),
            Err(PlotError::Conversion { row: 3, .. })
        ));
    }
}
