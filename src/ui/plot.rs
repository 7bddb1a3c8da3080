use std::collections::HashMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{ChartKind, ChartSpec, Series, XValue};
use crate::color::ColorMap;

const PLOT_HEIGHT: f32 = 380.0;
const BAR_GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render a chart description with egui_plot.
pub fn chart_plot(ui: &mut Ui, chart: &ChartSpec, colors: &ColorMap) {
    ui.heading(chart.title.as_str());

    if chart.is_empty() {
        ui.label("No data for the current selection.");
    }
    let undefined = chart.undefined_points();
    if undefined > 0 {
        ui.label(
            RichText::new(format!(
                "{undefined} undefined value(s) not plotted (zero denominator)"
            ))
            .color(Color32::LIGHT_RED),
        );
    }

    let mut plot = Plot::new(("chart", chart.mode.label()))
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if chart.kind != ChartKind::Scatter {
        let categories = chart.categories.clone();
        plot = plot.x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < 0.0 || (v - v.round()).abs() > 1e-6 {
                return String::new();
            }
            categories.get(v.round() as usize).cloned().unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| match chart.kind {
        ChartKind::Bar | ChartKind::GroupedBar => {
            let n = chart.series.len().max(1);
            for (s, series) in chart.series.iter().enumerate() {
                let color = colors.series_color(&series.color);
                let bars = stacked_bars(chart, series, s, n, color);
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.name));
            }
        }
        ChartKind::Scatter => {
            for series in &chart.series {
                let color = colors.series_color(&series.color);
                let xy: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .filter_map(|p| match (&p.x, p.y.value()) {
                        (XValue::Number(x), Some(y)) => Some([*x, y]),
                        _ => None,
                    })
                    .collect();
                plot_ui.points(
                    Points::new(xy)
                        .radius(4.0)
                        .color(color)
                        .name(&series.name),
                );

                if let Some(trend) = &series.trend {
                    let line: PlotPoints = vec![
                        [trend.x_min, trend.at(trend.x_min)],
                        [trend.x_max, trend.at(trend.x_max)],
                    ]
                    .into();
                    plot_ui.line(
                        Line::new(line)
                            .color(color)
                            .width(1.5)
                            .name(format!("{} trend", series.name)),
                    );
                }
            }
        }
    });
}

/// Bars for series `s` of `n`: side by side within a category, rows of the
/// same category stacked on each other. Undefined values are skipped.
fn stacked_bars(
    chart: &ChartSpec,
    series: &Series,
    s: usize,
    n: usize,
    color: Color32,
) -> Vec<Bar> {
    let slot = BAR_GROUP_WIDTH / n as f64;
    let offset = -BAR_GROUP_WIDTH / 2.0 + slot * (s as f64 + 0.5);
    let mut stack: HashMap<usize, f64> = HashMap::new();

    series
        .points
        .iter()
        .filter_map(|p| {
            let XValue::Category(cat) = &p.x else {
                return None;
            };
            let y = p.y.value()?;
            let i = chart.categories.iter().position(|c| c == cat)?;
            let base = stack.entry(i).or_insert(0.0);
            let bar = Bar::new(i as f64 + offset, y)
                .width(slot * 0.95)
                .base_offset(*base)
                .fill(color)
                .name(cat);
            *base += y;
            Some(bar)
        })
        .collect()
}
