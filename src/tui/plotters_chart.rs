//! Plotters-powered applicant scatter chart for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - marker shapes (dot vs cross) that the built-in scatter lacks
//! - easy to extend later (legend, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are
/// computed outside the render call. Series follow the game's visual
/// encoding: color = actual outcome (blue repaid, red defaulted), marker =
/// correctness (filled circle correct, cross wrong).
pub struct ApplicantScatterChart<'a> {
    pub repaid_correct: &'a [(f64, f64)],
    pub repaid_wrong: &'a [(f64, f64)],
    pub defaulted_correct: &'a [(f64, f64)],
    pub defaulted_wrong: &'a [(f64, f64)],
    /// X bounds (income, dollars).
    pub x_bounds: [f64; 2],
    /// Y bounds (credit score).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for ApplicantScatterChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels, without mesh lines: low-resolution terminal
            // rendering gets cluttered fast.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&fmt_thousands)
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let repaid_color = RGBColor(80, 160, 255); // blue
            let defaulted_color = RGBColor(255, 80, 80); // red

            // Correct guesses: dots.
            //
            // We intentionally avoid `Circle` markers here: the underlying
            // `plotters-ratatui-backend` maps circle radii incorrectly
            // (pixel radius -> normalized canvas units), producing huge
            // circles. A colored `Pixel` gives a clean dot in terminals.
            chart.draw_series(
                self.repaid_correct
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), repaid_color)),
            )?;
            chart.draw_series(
                self.defaulted_correct
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), defaulted_color)),
            )?;

            // Wrong guesses: crosses.
            chart.draw_series(
                self.repaid_wrong
                    .iter()
                    .map(|&(x, y)| Cross::new((x, y), 2, repaid_color)),
            )?;
            chart.draw_series(
                self.defaulted_wrong
                    .iter()
                    .map(|&(x, y)| Cross::new((x, y), 2, defaulted_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn fmt_thousands(v: &f64) -> String {
    let v = *v;
    if v.abs() >= 1000.0 {
        format!("{:.0}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}
