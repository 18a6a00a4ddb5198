use std::ops::Range;

use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Declarative chart description
// ---------------------------------------------------------------------------

/// How a series' line is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Corner of the plot area the legend box sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegendCorner {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// One `(x, y)` polyline with its legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: RGBColor,
    /// Stroke width in points.
    pub width: f64,
    pub style: LineStyle,
    /// Draw a dot at every data point.
    pub markers: bool,
}

impl Series {
    pub fn line(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>, color: RGBColor) -> Self {
        Series {
            label: label.into(),
            x,
            y,
            color,
            width: 2.0,
            style: LineStyle::Solid,
            markers: false,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    /// Point pairs; extra values on the longer side are ignored.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// A filled region between `lower` and `upper` over a shared x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub label: String,
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub color: RGBColor,
    pub opacity: f64,
}

impl Band {
    /// Polygon outline: along `lower` left to right, back along `upper`.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let lower = self.x.iter().copied().zip(self.lower.iter().copied());
        let upper: Vec<(f64, f64)> = self
            .x
            .iter()
            .copied()
            .zip(self.upper.iter().copied())
            .collect();
        lower.chain(upper.into_iter().rev()).collect()
    }
}

/// One plot area: axes, grid, legend and everything drawn on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub bands: Vec<Band>,
    pub legend: LegendCorner,
}

impl Panel {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Panel {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            ..Default::default()
        }
    }

    pub fn with_legend(mut self, corner: LegendCorner) -> Self {
        self.legend = corner;
        self
    }

    /// Axis ranges covering every finite value of every series and band.
    pub fn bounds(&self) -> Bounds {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.x.iter())
            .chain(self.bands.iter().flat_map(|b| b.x.iter()));
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.y.iter())
            .chain(
                self.bands
                    .iter()
                    .flat_map(|b| b.lower.iter().chain(b.upper.iter())),
            );
        Bounds {
            x: padded_range(xs.copied()),
            y: padded_range(ys.copied()),
        }
    }
}

/// A titled stack of panels, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
}

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// Data-space extent of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

const MARGIN: f64 = 0.05;

/// Min..max of the finite values, padded by 5% on each side.
///
/// No finite values gives `0..1`; a single distinct value is widened so the
/// range is never empty.
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        let half = if min == 0.0 { 1.0 } else { min.abs() * MARGIN };
        return (min - half)..(max + half);
    }
    (min - span * MARGIN)..(max + span * MARGIN)
}
