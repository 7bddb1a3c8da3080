use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::model::{CampaignDataset, CampaignRecord};

// ---------------------------------------------------------------------------
// Filter selection: selected channels + inclusive customer range
// ---------------------------------------------------------------------------

/// The user's current filter choices.
///
/// Unlike a "no constraint" default, an empty channel set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub channels: BTreeSet<String>,
    pub customers: RangeInclusive<u64>,
}

impl FilterSelection {
    /// Everything selected: all channels, the full observed customer range.
    pub fn all(dataset: &CampaignDataset) -> Self {
        let (lo, hi) = dataset.customer_bounds().unwrap_or((0, 0));
        FilterSelection {
            channels: dataset.channels.iter().cloned().collect(),
            customers: lo..=hi,
        }
    }

    /// Whether a record passes both predicates.
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        self.channels.contains(record.channel()) && self.customers.contains(&record.new_customers())
    }
}

/// Return indices of records that pass the selection, in table order.
pub fn filtered_indices(dataset: &CampaignDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the rows every downstream view consumes
// ---------------------------------------------------------------------------

/// A borrowed, order-preserving subsequence of a dataset.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    pub dataset: &'a CampaignDataset,
    pub indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a CampaignDataset, indices: &'a [usize]) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CampaignRecord> + 'a {
        let (dataset, indices) = (self.dataset, self.indices);
        indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Channels present in the view, in order of first appearance.
    pub fn channels(&self) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for rec in self.records() {
            if !seen.contains(&rec.channel()) {
                seen.push(rec.channel());
            }
        }
        seen
    }
}
