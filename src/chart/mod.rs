/// Chart layer: figure descriptions and PNG rendering.
///
/// `figures` turns loaded data into a [`figure::Figure`]; `render` draws a
/// figure onto a [`render::Canvas`] and saves it.

pub mod figure;
pub mod figures;
pub mod render;

pub use figure::{Band, Figure, LegendCorner, LineStyle, Panel, Series};
pub use render::{render_to_file, Canvas, Layout};
