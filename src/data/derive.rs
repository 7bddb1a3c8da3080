use super::model::{CampaignDataset, CampaignRecord, DerivedMetrics, Metric, SourceRow};

// ---------------------------------------------------------------------------
// Metric derivation
// ---------------------------------------------------------------------------

/// Compute CAC, conversion rate and break-even customers for one row.
///
/// A zero customer count is a division singularity: CAC becomes
/// [`Metric::Undefined`] and so does everything divided by it.
pub fn derive_metrics(spend: f64, new_customers: u64) -> DerivedMetrics {
    let customers = new_customers as f64;
    let cac = Metric::ratio(spend, customers);
    let conversion_rate = match Metric::ratio(customers, spend) {
        Metric::Defined(v) => Metric::from_f64(v * 100.0),
        Metric::Undefined => Metric::Undefined,
    };
    let break_even_customers = match cac {
        Metric::Defined(c) => Metric::ratio(spend, c),
        Metric::Undefined => Metric::Undefined,
    };

    DerivedMetrics {
        cac,
        conversion_rate,
        break_even_customers,
    }
}

/// Attach derived metrics to every row, preserving order and cardinality.
pub fn derive_dataset(source_columns: Vec<String>, rows: Vec<SourceRow>) -> CampaignDataset {
    let mut singular = 0usize;
    let records: Vec<CampaignRecord> = rows
        .into_iter()
        .map(|source| {
            let metrics = derive_metrics(source.spend, source.new_customers);
            if metrics.cac.is_undefined() {
                singular += 1;
            }
            CampaignRecord { source, metrics }
        })
        .collect();

    if singular > 0 {
        log::warn!("{singular} row(s) have zero new customers; CAC is undefined for them");
    }

    CampaignDataset::new(source_columns, records)
}
