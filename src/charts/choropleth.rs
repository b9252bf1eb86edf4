//! Choropleth rendering: region polygons shaded by station count.

use plotters::prelude::*;
use std::path::Path;

use crate::geo::RegionCount;

use super::{backend_error, viridis, ChartError};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 1100;
const MARGIN: f64 = 40.0;
const LEGEND_WIDTH: u32 = 110;
const LEGEND_STEPS: usize = 64;

/// Renders the joined region/count data as a shaded map PNG.
pub struct ChoroplethRenderer;

impl ChoroplethRenderer {
    pub fn render(path: &Path, title: &str, regions: &[RegionCount]) -> Result<(), ChartError> {
        if regions.iter().all(|rc| rc.region.rings.is_empty()) {
            return Err(ChartError::NoData(title.to_string()));
        }

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;
        let root = root
            .titled(title, ("sans-serif", 30))
            .map_err(backend_error)?;
        let (map_area, legend_area) = root.split_horizontally(WIDTH - LEGEND_WIDTH);

        let projection = Projection::fit(regions, map_area.dim_in_pixel());
        let max_count = regions.iter().map(|rc| rc.count).max().unwrap_or(0).max(1);

        for rc in regions {
            let shade = rc.count as f64 / max_count as f64;
            let fill = viridis(shade);
            for ring in &rc.region.rings {
                let mut points: Vec<(i32, i32)> =
                    ring.iter().map(|pos| projection.to_pixel(*pos)).collect();
                map_area
                    .draw(&Polygon::new(points.clone(), fill.filled()))
                    .map_err(backend_error)?;
                // Close the ring for the outline stroke.
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
                map_area
                    .draw(&PathElement::new(points, BLACK.stroke_width(1)))
                    .map_err(backend_error)?;
            }
        }

        Self::draw_legend(&legend_area, max_count)?;
        root.present().map_err(backend_error)?;
        Ok(())
    }

    fn draw_legend(
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        max_count: usize,
    ) -> Result<(), ChartError> {
        let (_, height) = area.dim_in_pixel();
        let bar_top = 60i32;
        let bar_height = height as i32 - 2 * bar_top;
        let step = bar_height / LEGEND_STEPS as i32;

        for i in 0..LEGEND_STEPS {
            // Highest value at the top of the bar.
            let t = 1.0 - i as f64 / (LEGEND_STEPS - 1) as f64;
            let y0 = bar_top + i as i32 * step;
            area.draw(&Rectangle::new(
                [(20, y0), (50, y0 + step)],
                viridis(t).filled(),
            ))
            .map_err(backend_error)?;
        }

        area.draw(&Text::new(
            max_count.to_string(),
            (56, bar_top),
            ("sans-serif", 16),
        ))
        .map_err(backend_error)?;
        area.draw(&Text::new(
            "0",
            (56, bar_top + bar_height - 8),
            ("sans-serif", 16),
        ))
        .map_err(backend_error)?;
        Ok(())
    }
}

/// Equirectangular [lon, lat] → pixel mapping over the shape bounds,
/// longitude scaled by cos(mid-latitude) to keep shapes recognizable.
struct Projection {
    min_lon: f64,
    max_lat: f64,
    scale: f64,
    lon_stretch: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(regions: &[RegionCount], (width, height): (u32, u32)) -> Self {
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        for rc in regions {
            for ring in &rc.region.rings {
                for [lon, lat] in ring {
                    min_lon = min_lon.min(*lon);
                    max_lon = max_lon.max(*lon);
                    min_lat = min_lat.min(*lat);
                    max_lat = max_lat.max(*lat);
                }
            }
        }
        if min_lon > max_lon {
            // No coordinates at all; render() pre-checks this, keep a sane fallback.
            (min_lon, max_lon, min_lat, max_lat) = (5.0, 16.0, 47.0, 55.0);
        }

        let mid_lat = (min_lat + max_lat) / 2.0;
        let lon_stretch = mid_lat.to_radians().cos();
        let span_x = ((max_lon - min_lon) * lon_stretch).max(f64::EPSILON);
        let span_y = (max_lat - min_lat).max(f64::EPSILON);

        let usable_w = width as f64 - 2.0 * MARGIN;
        let usable_h = height as f64 - 2.0 * MARGIN;
        let scale = (usable_w / span_x).min(usable_h / span_y);

        // Center the map inside the drawing area.
        let offset_x = MARGIN + (usable_w - span_x * scale) / 2.0;
        let offset_y = MARGIN + (usable_h - span_y * scale) / 2.0;

        Self {
            min_lon,
            max_lat,
            scale,
            lon_stretch,
            offset_x,
            offset_y,
        }
    }

    fn to_pixel(&self, [lon, lat]: [f64; 2]) -> (i32, i32) {
        let x = self.offset_x + (lon - self.min_lon) * self.lon_stretch * self.scale;
        let y = self.offset_y + (self.max_lat - lat) * self.scale;
        (x.round() as i32, y.round() as i32)
    }
}
