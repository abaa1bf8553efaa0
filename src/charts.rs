//! Chart rendering with the `plotters` bitmap backend.
//!
//! Every function here is a stateless transform from prepared numeric
//! sequences to one 1200x800 PNG file. Styling loosely follows ggplot:
//! light gray plot area, white grid lines, muted series colors.

use anyhow::{Result, ensure};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const CHART_SIZE: (u32, u32) = (1200, 800);

/// ggplot-like plot-area background.
const PLOT_BG: RGBColor = RGBColor(229, 229, 229);

/// Series colors, one per attribute, in legend order.
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(226, 74, 51),
    RGBColor(52, 138, 189),
    RGBColor(119, 67, 142),
    RGBColor(255, 160, 47),
    RGBColor(106, 166, 50),
    RGBColor(83, 81, 84),
];

/// Bar width in category units; six bars per category span 0.6.
const BAR_WIDTH: f64 = 0.10;

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let pad = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (max - min) * 0.05
    };
    (min - pad, max + pad)
}

/// Formats a fractional axis position as a category label, blank between
/// categories.
fn category_label(position: f64, labels: &[String]) -> String {
    if (position - position.round()).abs() > 0.01 || position.round() < 0.0 {
        return String::new();
    }
    labels
        .get(position.round() as usize)
        .cloned()
        .unwrap_or_default()
}

/// Draws a horizontal bar chart with one bar per label, first label on top.
pub fn horizontal_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    ensure!(!labels.is_empty(), "no rows to chart for {}", title);
    ensure!(labels.len() == values.len(), "label/value length mismatch");

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = values.iter().cloned().fold(0.0f64, f64::max) * 1.05;
    let x_max = if x_max <= 0.0 { 1.0 } else { x_max };
    let n = labels.len();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(180)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    chart.plotting_area().fill(&PLOT_BG)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(&WHITE)
        .x_desc(x_desc)
        .y_labels(n)
        .y_label_formatter(&|y: &f64| {
            // row 0 is drawn at the top
            if (y - y.round()).abs() > 0.01 || y.round() < 0.0 {
                return String::new();
            }
            let idx = n as f64 - 1.0 - y.round();
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .label_style(("sans-serif", 14))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let y = (n - 1 - i) as f64;
        Rectangle::new([(0.0, y - 0.4), (*v, y + 0.4)], SERIES_COLORS[1].filled())
    }))?;

    root.present()?;
    info!(path = %path.display(), "chart saved");
    Ok(())
}

/// Draws a grouped bar chart: one bar cluster per label, one bar per series.
pub fn grouped_bar_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    labels: &[String],
    series: &[(&'static str, Vec<f64>)],
) -> Result<()> {
    ensure!(!labels.is_empty(), "no rows to chart for {}", title);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = series
        .iter()
        .flat_map(|(_, values)| values.iter().cloned())
        .fold(0.0f64, f64::max)
        * 1.1;
    let y_max = if y_max <= 0.0 { 1.0 } else { y_max };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(labels.len() as f64 - 0.5), 0f64..y_max)?;

    chart.plotting_area().fill(&PLOT_BG)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&WHITE)
        .y_desc(y_desc)
        .x_labels(labels.len())
        .x_label_formatter(&|x: &f64| category_label(*x, labels))
        .label_style(("sans-serif", 14))
        .draw()?;

    let cluster_width = series.len() as f64;
    for (i, (name, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        let offset = (i as f64 - (cluster_width - 1.0) / 2.0) * BAR_WIDTH;

        chart
            .draw_series(values.iter().enumerate().map(|(j, v)| {
                let x0 = j as f64 + offset - BAR_WIDTH / 2.0;
                Rectangle::new([(x0, 0.0), (x0 + BAR_WIDTH, *v)], color.filled())
            }))?
            .label(*name)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()?;

    root.present()?;
    info!(path = %path.display(), "chart saved");
    Ok(())
}

/// Draws a 2x2 grid of scatter panels sharing one figure title and axis
/// captions, one legend per panel.
pub fn scatter_grid(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    panels: &[(&'static str, Vec<(f64, f64)>)],
) -> Result<()> {
    ensure!(panels.len() == 4, "scatter grid takes exactly four panels");

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled(title, ("sans-serif", 24))?;
    let areas = titled.split_evenly((2, 2));

    for (idx, ((name, points), area)) in panels.iter().zip(areas.iter()).enumerate() {
        ensure!(!points.is_empty(), "no points for scatter panel {}", name);

        let (x_min, x_max) = padded_range(points.iter().map(|(x, _)| *x));
        let (y_min, y_max) = padded_range(points.iter().map(|(_, y)| *y));

        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart.plotting_area().fill(&PLOT_BG)?;

        chart
            .configure_mesh()
            .light_line_style(&WHITE)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(("sans-serif", 12))
            .draw()?;

        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, color.filled())),
            )?
            .label(*name)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 12))
            .draw()?;
    }

    root.present()?;
    info!(path = %path.display(), "chart saved");
    Ok(())
}

/// Draws one line with circle markers per series against a year axis.
pub fn year_line_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    years: &[i32],
    series: &[(&'static str, Vec<f64>)],
) -> Result<()> {
    ensure!(!years.is_empty(), "no rows to chart for {}", title);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = *years.iter().min().unwrap_or(&0);
    let x_max = *years.iter().max().unwrap_or(&0) + 1;
    let (y_min, y_max) = padded_range(
        series
            .iter()
            .flat_map(|(_, values)| values.iter().cloned()),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.plotting_area().fill(&PLOT_BG)?;

    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .y_desc(y_desc)
        .label_style(("sans-serif", 14))
        .draw()?;

    for (i, (name, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart
            .draw_series(
                LineSeries::new(
                    years.iter().zip(values.iter()).map(|(x, y)| (*x, *y)),
                    color.stroke_width(1),
                )
                .point_size(3),
            )?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()?;

    root.present()?;
    info!(path = %path.display(), "chart saved");
    Ok(())
}
