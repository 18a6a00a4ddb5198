use std::path::PathBuf;

/// Errors raised while loading result tables or rendering charts.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Input table missing or unreadable
    #[error("cannot open {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text (ragged rows, bad UTF-8, missing header)
    #[error("malformed table {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Expected column absent from the table header
    #[error("{}: missing column '{column}'", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// Expected column absent from a row
    #[error("row {row}: missing column '{column}'")]
    Schema { column: String, row: usize },

    /// Cell not parseable as a number
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    Conversion {
        column: String,
        row: usize,
        value: String,
    },

    /// Zero experiment tables discovered
    #[error(
        "no {pattern} files found in {}; run the measurement stage first",
        .dir.display()
    )]
    NoInput { dir: PathBuf, pattern: String },

    /// Groups disagree on the sweep axis used for reference curves
    #[error("group '{group}' sweeps B over {found:?}, expected {expected:?}")]
    AxisMismatch {
        group: String,
        expected: Vec<u32>,
        found: Vec<u32>,
    },

    /// Plotting backend failure
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PlotError>;
