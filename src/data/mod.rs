/// Data layer: reading result tables, typed schemas, grouping and metrics.
///
/// Architecture:
/// ```text
///  <hasher>_B<b>.csv         b_analysis.csv
///        │                         │
///        ▼                         ▼
///   ┌──────────┐             ┌──────────┐
///   │  table    │  csv → rows│  table    │
///   └──────────┘             └──────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────────────┐     ┌──────────┐
///   │ ExperimentSeries  │     │  group    │  by hasher, sort by B
///   └──────────────────┘     └──────────┘
///                                  │
///                                  ▼
///                            ┌──────────┐
///                            │  metric   │  percentages, reference curves
///                            └──────────┘
/// ```

pub mod group;
pub mod metric;
pub mod model;
pub mod table;
