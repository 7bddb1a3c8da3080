use std::path::Path;

use crate::chart::{build_chart, ChartMode, ChartSpec};
use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterSelection, FilteredView};
use crate::data::model::CampaignDataset;
use crate::data::summary::{summarize_cac, CacSummary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Per-session state, independent of rendering. The dataset is loaded once
/// and never mutated; every interaction updates the selection or mode and
/// recomputes the derived views.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<CampaignDataset>,

    /// Current channel / customer-range choices.
    pub selection: Option<FilterSelection>,

    /// Active visualization.
    pub mode: ChartMode,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart for the active mode over the visible rows (cached).
    pub chart: Option<ChartSpec>,

    /// Per-channel CAC statistics over the visible rows (cached).
    pub summary: Vec<CacSummary>,

    /// Channel colours.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Confirmation of the last successful action (e.g. an export).
    pub notice: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset with everything selected.
    pub fn set_dataset(&mut self, dataset: CampaignDataset) {
        self.selection = Some(FilterSelection::all(&dataset));
        self.color_map = Some(ColorMap::new(&dataset.channels));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.notice = None;
        self.refresh();
    }

    /// Record a fatal load failure; nothing is rendered until a file loads.
    pub fn set_load_error(&mut self, message: String) {
        self.dataset = None;
        self.selection = None;
        self.visible_indices.clear();
        self.chart = None;
        self.summary.clear();
        self.color_map = None;
        self.notice = None;
        self.status_message = Some(message);
    }

    /// Surface the outcome of writing the visible rows to `path`.
    pub fn report_export(&mut self, path: &Path, result: anyhow::Result<()>) {
        match result {
            Ok(()) => {
                self.notice = Some(format!(
                    "Saved {} rows to {}",
                    self.visible_indices.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.notice = None;
                self.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }

    /// Borrow the rows passing the current filters.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_ref()
            .map(|ds| FilteredView::new(ds, &self.visible_indices))
    }

    /// Recompute visible rows, chart and summary after any change.
    pub fn refresh(&mut self) {
        let (Some(ds), Some(sel)) = (&self.dataset, &self.selection) else {
            return;
        };
        self.notice = None;
        self.visible_indices = filtered_indices(ds, sel);
        let view = FilteredView::new(ds, &self.visible_indices);
        self.chart = Some(build_chart(self.mode, &view));
        self.summary = summarize_cac(&view);
        log::debug!(
            "refiltered: {} of {} rows visible, mode {:?}",
            view.len(),
            ds.len(),
            self.mode
        );
    }

    /// Switch visualization; only the chart depends on the mode.
    pub fn set_mode(&mut self, mode: ChartMode) {
        self.mode = mode;
        if let Some(ds) = &self.dataset {
            let view = FilteredView::new(ds, &self.visible_indices);
            self.chart = Some(build_chart(mode, &view));
        }
        log::debug!("visualization mode set to {mode:?}");
    }

    /// Toggle a single channel in the selection.
    pub fn toggle_channel(&mut self, channel: &str) {
        if let Some(sel) = &mut self.selection {
            if !sel.channels.remove(channel) {
                sel.channels.insert(channel.to_string());
            }
        }
        self.refresh();
    }

    /// Select every channel.
    pub fn select_all_channels(&mut self) {
        if let (Some(ds), Some(sel)) = (&self.dataset, &mut self.selection) {
            sel.channels = ds.channels.iter().cloned().collect();
        }
        self.refresh();
    }

    /// Deselect every channel.
    pub fn select_no_channels(&mut self) {
        if let Some(sel) = &mut self.selection {
            sel.channels.clear();
        }
        self.refresh();
    }

    /// Set the inclusive `New_Customers` range.
    pub fn set_customer_range(&mut self, min: u64, max: u64) {
        if let Some(sel) = &mut self.selection {
            sel.customers = min..=max;
        }
        self.refresh();
    }
}
