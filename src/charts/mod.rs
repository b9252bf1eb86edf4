//! Charts module - static chart, choropleth and point map rendering

mod bars;
mod choropleth;
mod pointmap;

pub use bars::BarChartRenderer;
pub use choropleth::ChoroplethRenderer;
pub use pointmap::PointMapRenderer;

use plotters::style::RGBColor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Nothing to draw: {0}")]
    NoData(String),
}

/// Plotters backend errors are generic over the backend; flatten them to a
/// message once at the boundary.
pub(crate) fn backend_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}

/// Viridis anchor stops (matplotlib's default colormap).
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Sample the viridis ramp at `t` in [0, 1].
pub(crate) fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = scaled.ceil() as usize;
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = VIRIDIS[lower];
    let (r1, g1, b1) = VIRIDIS[upper];
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - frac) + b as f64 * frac).round() as u8;
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}
