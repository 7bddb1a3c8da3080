use eframe::egui::{self, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CacDashboardApp {
    pub state: AppState,
}

impl CacDashboardApp {
    /// Start a session on the configured dataset.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::default();
        panels::load_into(&mut state, &config.dataset_path);
        Self { state }
    }
}

impl eframe::App for CacDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart, summary, data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = state
                .status_message
                .as_deref()
                .unwrap_or("Open a file to view the dashboard  (File → Open…)");
            ui.heading(msg);
        });
        return;
    }

    let mut download = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("📊 Customer Acquisition Cost Dashboard");
            ui.separator();

            let fallback = ColorMap::new(&[]);
            let colors = state.color_map.as_ref().unwrap_or(&fallback);
            if let Some(chart) = &state.chart {
                plot::chart_plot(ui, chart, colors);
            }
            ui.separator();

            ui.heading("Summary Statistics");
            tables::summary_table(ui, &state.summary);
            ui.separator();

            ui.heading("Filtered Data Table");
            if let Some(view) = state.view() {
                tables::data_table(ui, &view);
            }
            ui.add_space(8.0);

            download = ui.button("Download Filtered Data").clicked();
        });

    if download {
        panels::download_dialog(state);
    }
}
