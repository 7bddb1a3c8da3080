use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::Metric;
use crate::data::summary::{CacSummary, SUMMARY_HEADERS};

const ROW_HEIGHT: f32 = 18.0;

fn metric_text(m: Metric) -> RichText {
    match m {
        Metric::Defined(_) => RichText::new(m.to_string()),
        Metric::Undefined => RichText::new(m.to_string()).italics().color(Color32::LIGHT_RED),
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Per-channel CAC statistics table.
pub fn summary_table(ui: &mut Ui, summary: &[CacSummary]) {
    if summary.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), SUMMARY_HEADERS.len())
            .vscroll(false)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in SUMMARY_HEADERS {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for group in summary {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(group.channel.as_str());
                        });
                        row.col(|ui| {
                            ui.label(group.count.to_string());
                        });
                        for m in [
                            group.mean,
                            group.std,
                            group.min,
                            group.q1,
                            group.median,
                            group.q3,
                            group.max,
                        ] {
                            row.col(|ui| {
                                ui.label(metric_text(m));
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Filtered rows
// ---------------------------------------------------------------------------

/// Every visible row: source columns, then the derived metrics.
pub fn data_table(ui: &mut Ui, view: &FilteredView<'_>) {
    if view.is_empty() {
        ui.label("No rows match the current filters.");
    }
    let columns = view.dataset.all_columns();
    let records: Vec<_> = view.records().collect();

    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(70.0), columns.len())
            .max_scroll_height(320.0)
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for name in &columns {
                    header.col(|ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let rec = records[row.index()];
                    for field in &rec.source.fields {
                        row.col(|ui| {
                            ui.label(field.as_str());
                        });
                    }
                    let m = &rec.metrics;
                    for value in [m.cac, m.conversion_rate, m.break_even_customers] {
                        row.col(|ui| {
                            ui.label(metric_text(value));
                        });
                    }
                });
            });
    });
}
