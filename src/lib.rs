//! Charts for recorded HyperLogLog experiment results.
//!
//! The measurement stage writes one `<hasher>_B<b>.csv` table per experiment
//! and a `b_analysis.csv` summary. This crate reads those tables and renders
//! estimate-vs-truth charts per experiment plus an error/deviation sweep
//! over B.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod run;

pub use config::PlotConfig;
pub use error::{PlotError, Result};
