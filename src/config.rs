use std::path::{Path, PathBuf};

use crate::chart::Layout;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Where to read tables, where to write charts, and how to recognise them.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Directory holding the measurement stage's CSV tables.
    pub output_dir: PathBuf,

    /// Directory charts are written to (created if missing).
    pub plots_dir: PathBuf,

    /// Token every experiment table's file name must contain.
    pub experiment_token: String,

    /// Extension of experiment tables, without the dot.
    pub extension: String,

    /// File name of the summary table inside `output_dir`.
    pub summary_file: String,

    /// Size and resolution of every chart.
    pub layout: Layout,
}

impl PlotConfig {
    /// `<root>/output` and `<root>/plots` with the default naming rules.
    pub fn with_root(root: &Path) -> Self {
        Self {
            output_dir: root.join("output"),
            plots_dir: root.join("plots"),
            experiment_token: "_B".to_string(),
            extension: "csv".to_string(),
            summary_file: "b_analysis.csv".to_string(),
            layout: Layout::default(),
        }
    }

    /// Glob-style description of the experiment tables, for messages.
    pub fn pattern(&self) -> String {
        format!("*{}*.{}", self.experiment_token, self.extension)
    }

    /// Whether `file_name` names an experiment table.
    pub fn is_experiment_table(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') {
            return false;
        }
        match file_name.rsplit_once('.') {
            Some((stem, ext)) => ext == self.extension && stem.contains(&self.experiment_token),
            None => false,
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }
}

impl Default for PlotConfig {
    /// Rooted at this crate's own directory.
    fn default() -> Self {
        Self::with_root(Path::new(env!("CARGO_MANIFEST_DIR")))
    }
}
