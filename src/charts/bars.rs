//! Horizontal bar charts (category vs. count) via plotters.

use plotters::prelude::*;
use std::path::Path;

use super::{backend_error, viridis, ChartError};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 700;

/// Renders descending rankings as horizontal bar chart PNGs.
pub struct BarChartRenderer;

impl BarChartRenderer {
    /// Draw `entries` (already sorted descending) with the largest bar on
    /// top. Values are whatever the aggregation produced; no rounding here.
    pub fn render(
        path: &Path,
        title: &str,
        value_label: &str,
        entries: &[(String, f64)],
    ) -> Result<(), ChartError> {
        if entries.is_empty() {
            return Err(ChartError::NoData(title.to_string()));
        }

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;

        let n = entries.len();
        let max_value = entries
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::MIN, f64::max)
            .max(1.0);

        // Slot 0 is the bottom band; reverse so rank 0 lands on top.
        let labels: Vec<String> = entries.iter().rev().map(|(name, _)| name.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(280)
            .build_cartesian_2d(0.0..max_value * 1.05, (0..n).into_segmented())
            .map_err(backend_error)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(value_label)
            .y_labels(n)
            .y_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(slot) => labels.get(*slot).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(backend_error)?;

        chart
            .draw_series(entries.iter().enumerate().map(|(rank, (_, value))| {
                let slot = n - 1 - rank;
                let shade = if n > 1 {
                    rank as f64 / (n - 1) as f64
                } else {
                    0.0
                };
                Rectangle::new(
                    [
                        (0.0, SegmentValue::Exact(slot)),
                        (*value, SegmentValue::Exact(slot + 1)),
                    ],
                    viridis(shade).filled(),
                )
            }))
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;
        Ok(())
    }
}
