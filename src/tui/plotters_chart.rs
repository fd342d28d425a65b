//! Plotters-powered chart widget for Ratatui.
//!
//! One widget draws all three dashboard charts: the two time series use line
//! series (one per country) and the cases-vs-deaths chart uses markers.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One colored series of points.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub points: Vec<(f64, f64)>,
    pub rgb: (u8, u8, u8),
}

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, which keeps
/// `render()` focused on drawing.
pub struct DashPlottersChart<'a> {
    /// Drawn as connected lines, in order.
    pub lines: &'a [PlotSeries],
    /// Drawn as small square markers.
    pub markers: &'a [PlotSeries],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for DashPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.is_empty() {
            return;
        }
        if area.width < 20 || area.height < 8 {
            buf.set_stringn(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                usize::from(area.width),
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        // Markers are a 3x3 block of pixels; a single braille dot is hard to see.
        let dx = (x1 - x0) / 200.0;
        let dy = (y1 - y0) / 100.0;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for series in self.lines {
                let (r, g, b) = series.rgb;
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(series.points.iter().copied(), &color))?;
            }

            // `Circle` markers are avoided: the backend maps circle radii to
            // canvas units incorrectly and draws huge circles.
            for series in self.markers {
                let (r, g, b) = series.rgb;
                let color = RGBColor(r, g, b);
                chart.draw_series(series.points.iter().flat_map(|&(x, y)| {
                    [-1.0, 0.0, 1.0].into_iter().flat_map(move |i| {
                        [-1.0, 0.0, 1.0]
                            .into_iter()
                            .map(move |j| Pixel::new((x + i * dx, y + j * dy), color))
                    })
                }))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
