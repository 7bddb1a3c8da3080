use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartMode;
use crate::data::export::{save_csv, EXPORT_FILE_NAME};
use crate::data::loader::load_file;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let channels = dataset.channels.clone();
    let bounds = dataset.customer_bounds().unwrap_or((0, 0));
    let Some(selection) = state.selection.clone() else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Channel multi-select ----
            let header = format!(
                "Marketing Channels  ({}/{})",
                selection.channels.len(),
                channels.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("channels")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_channels();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_channels();
                        }
                    });

                    for channel in &channels {
                        let mut checked = selection.channels.contains(channel);
                        let mut text = RichText::new(channel);
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(channel));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_channel(channel);
                        }
                    }
                });
            ui.separator();

            // ---- New customers range ----
            ui.strong("New Customers");
            let (lo, hi) = bounds;
            let mut min = *selection.customers.start();
            let mut max = *selection.customers.end();
            let min_changed = ui
                .add(egui::Slider::new(&mut min, lo..=hi).text("min"))
                .changed();
            let max_changed = ui
                .add(egui::Slider::new(&mut max, lo..=hi).text("max"))
                .changed();
            if min_changed || max_changed {
                state.set_customer_range(min, max);
            }
            if min > max {
                ui.label(RichText::new("Empty range: min exceeds max").color(Color32::YELLOW));
            }
            ui.separator();

            // ---- Visualization mode ----
            ui.strong("Choose a Visualization");
            let mut mode = state.mode;
            for candidate in ChartMode::ALL {
                ui.radio_value(&mut mode, candidate, candidate.label());
            }
            if mode != state.mode {
                state.set_mode(mode);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }

        if let Some(notice) = &state.notice {
            ui.separator();
            ui.label(RichText::new(notice).color(Color32::LIGHT_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Load `path` into the session, surfacing failures in the status line.
pub fn load_into(state: &mut AppState, path: &Path) {
    match load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows from {} with channels {:?}",
                dataset.len(),
                path.display(),
                dataset.channels
            );
            if dataset.is_empty() {
                log::warn!("{} has a header but no rows", path.display());
            }
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.set_load_error(format!("Error: {e}"));
        }
    }
}

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open marketing data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Ask where to save the filtered rows and write them there.
pub fn download_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let Some(view) = state.view() else {
        return;
    };
    let result = save_csv(&view, &path);
    state.report_export(&path, result);
}
