use std::path::Path;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;

use super::figure::{Figure, LegendCorner, LineStyle, Panel};
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Physical layout
// ---------------------------------------------------------------------------

/// Output size in inches and the raster resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            width_in: 10.0,
            height_in: 8.0,
            dpi: 180,
        }
    }
}

impl Layout {
    /// Raster size in pixels.
    pub fn pixels(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert typographic points (1/72 in) to pixels.
    pub fn px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }

    fn text(&self, points: f64) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, self.px(points), FontStyle::Normal).color(&BLACK)
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

// ---------------------------------------------------------------------------
// Canvas – locally owned drawing surface
// ---------------------------------------------------------------------------

/// An in-memory RGB surface. The plotting backend only borrows it while a
/// figure is drawn; [`Canvas::save`] consumes it.
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    /// White canvas of the layout's pixel size.
    pub fn new(layout: &Layout) -> Self {
        let (width, height) = layout.pixels();
        Canvas {
            width,
            height,
            buffer: vec![255; width as usize * height as usize * 3],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draw `figure` onto the surface.
    pub fn draw(&mut self, figure: &Figure, layout: &Layout) -> Result<()> {
        let root = BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height))
            .into_drawing_area();
        draw_figure(&root, figure, layout)?;
        root.present().map_err(render_err)
    }

    /// Hand the pixels over as an image.
    pub fn into_image(self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.buffer)
            .ok_or_else(|| PlotError::Render("canvas buffer does not match its size".into()))
    }

    /// Encode as PNG at `path`, replacing any existing file.
    pub fn save(self, path: &Path) -> Result<()> {
        self.into_image()?.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Draw `figure` and write it to `path` as a PNG.
pub fn render_to_file(figure: &Figure, layout: &Layout, path: &Path) -> Result<()> {
    let mut canvas = Canvas::new(layout);
    canvas.draw(figure, layout)?;
    canvas.save(path)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draw a figure on any plotters backend: title on top, panels stacked below.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    layout: &Layout,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;
    let body = root
        .titled(&figure.title, layout.text(14.0))
        .map_err(render_err)?;

    let areas = body.split_evenly((figure.panels.len().max(1), 1));
    for (panel, area) in figure.panels.iter().zip(areas.iter()) {
        draw_panel(area, panel, layout)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    layout: &Layout,
) -> Result<()> {
    let bounds = panel.bounds();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, layout.text(12.0))
        .margin(layout.px_u32(8.0))
        .x_label_area_size(layout.px_u32(30.0))
        .y_label_area_size(layout.px_u32(48.0))
        .build_cartesian_2d(bounds.x, bounds.y)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .label_style(layout.text(9.0))
        .axis_desc_style(layout.text(10.0))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.08))
        .draw()
        .map_err(render_err)?;

    let legend_len = layout.px_u32(20.0) as i32;
    let legend_half = layout.px_u32(4.0) as i32;

    for band in &panel.bands {
        let fill = band.color.mix(band.opacity).filled();
        chart
            .draw_series(std::iter::once(Polygon::new(band.outline(), fill)))
            .map_err(render_err)?
            .label(band.label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - legend_half), (x + legend_len, y + legend_half)], fill)
            });
    }

    for series in &panel.series {
        let width = layout.px_u32(series.width);
        let stroke = series.color.stroke_width(width);
        let points = series.points();

        if series.markers {
            let radius = (width * 2) as i32;
            let dot = series.color.filled();
            chart
                .draw_series(points.iter().map(|&p| Circle::new(p, radius, dot)))
                .map_err(render_err)?;
        }

        let pattern = dash_pattern(series.style, width);
        let anno = match pattern {
            None => chart.draw_series(LineSeries::new(points, stroke)),
            Some((dash, gap)) => {
                chart.draw_series(DashedLineSeries::new(points, dash, gap, stroke))
            }
        }
        .map_err(render_err)?
        .label(series.label.as_str());

        match pattern {
            None => {
                anno.legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_len, y)], stroke)
                });
            }
            Some((dash, gap)) => {
                anno.legend(move |(x, y)| {
                    DashedPathElement::new(vec![(x, y), (x + legend_len, y)], dash, gap, stroke)
                });
            }
        }
    }

    if !panel.series.is_empty() || !panel.bands.is_empty() {
        chart
            .configure_series_labels()
            .position(label_position(panel.legend))
            .legend_area_size(legend_len + layout.px_u32(6.0) as i32)
            .label_font(layout.text(9.0))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

/// Dash and gap lengths in pixels for a stroke `width` pixels wide.
///
/// `None` for solid lines. Series and their legend glyphs share the pattern.
fn dash_pattern(style: LineStyle, width: u32) -> Option<(i32, i32)> {
    let w = width as i32;
    match style {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some((w * 4, w * 2)),
        LineStyle::Dotted => Some((w, w * 2)),
    }
}

fn label_position(corner: LegendCorner) -> SeriesLabelPosition {
    match corner {
        LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
        LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::Series;

    #[test]
    fn default_layout_is_180_dpi() {
        let layout = Layout::default();
        assert_eq!(layout.pixels(), (1800, 1440));
        assert!((layout.px(72.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn canvas_starts_white_and_round_trips_to_image() {
        let layout = Layout {
            width_in: 1.0,
            height_in: 0.5,
            dpi: 40,
        };
        let canvas = Canvas::new(&layout);
        assert_eq!(canvas.size(), (40, 20));
        let image = canvas.into_image().unwrap();
        assert_eq!(image.dimensions(), (40, 20));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn dashed_and_dotted_patterns_differ() {
        assert_eq!(dash_pattern(LineStyle::Solid, 3), None);
        let (dash, gap) = dash_pattern(LineStyle::Dashed, 3).unwrap();
        let (dot, dot_gap) = dash_pattern(LineStyle::Dotted, 3).unwrap();
        assert!(dash > dot);
        assert_eq!(dot, 3);
        assert_eq!(gap, dot_gap);
    }

    #[test]
    fn legend_corner_maps_to_label_position() {
        assert!(matches!(
            label_position(LegendCorner::UpperRight),
            SeriesLabelPosition::UpperRight
        ));
        assert!(matches!(
            label_position(LegendCorner::default()),
            SeriesLabelPosition::UpperLeft
        ));
    }

    #[test]
    fn panel_with_styled_legends_renders() {
        let layout = Layout {
            width_in: 4.0,
            height_in: 3.0,
            dpi: 60,
        };
        let x = vec![1.0, 2.0, 3.0];
        let mut panel = Panel::new("p", "x", "y").with_legend(LegendCorner::UpperRight);
        for (label, style) in [
            ("solid", LineStyle::Solid),
            ("dashed", LineStyle::Dashed),
            ("dotted", LineStyle::Dotted),
        ] {
            panel.series.push(
                Series::line(label, x.clone(), vec![3.0, 2.0, 1.0], BLACK).with_style(style),
            );
        }
        let figure = Figure {
            title: "styles".into(),
            panels: vec![panel],
        };

        let mut canvas = Canvas::new(&layout);
        canvas.draw(&figure, &layout).unwrap();
        let image = canvas.into_image().unwrap();
        assert!(image.pixels().any(|p| p.0 != [255, 255, 255]));
    }
}
