use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::Metric;

// ---------------------------------------------------------------------------
// Per-channel descriptive statistics of CAC
// ---------------------------------------------------------------------------

/// Descriptive statistics of CAC for one channel.
///
/// Undefined CAC values take part as +infinity, so a channel with a
/// zero-customer row reports an undefined mean and max instead of hiding
/// the row. Any statistic that is not finite is `Metric::Undefined`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacSummary {
    pub channel: String,
    pub count: usize,
    pub mean: Metric,
    pub std: Metric,
    pub min: Metric,
    pub q1: Metric,
    pub median: Metric,
    pub q3: Metric,
    pub max: Metric,
}

/// Column headers of the rendered summary table.
pub const SUMMARY_HEADERS: [&str; 9] = [
    "Marketing_Channel",
    "count",
    "mean",
    "std",
    "min",
    "25%",
    "50%",
    "75%",
    "max",
];

/// Group the view by channel (sorted by name) and describe CAC per group.
/// Channels with no rows in the view are absent.
pub fn summarize_cac(view: &FilteredView<'_>) -> Vec<CacSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for rec in view.records() {
        let cac = rec.metrics.cac.value().unwrap_or(f64::INFINITY);
        groups.entry(rec.channel()).or_default().push(cac);
    }

    groups
        .into_iter()
        .map(|(channel, values)| describe(channel, values))
        .collect()
}

fn describe(channel: &str, mut values: Vec<f64>) -> CacSummary {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    let std = if n < 2 {
        f64::NAN
    } else {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    };

    CacSummary {
        channel: channel.to_string(),
        count: n,
        mean: Metric::from_f64(mean),
        std: Metric::from_f64(std),
        min: Metric::from_f64(values[0]),
        q1: Metric::from_f64(quantile(&values, 0.25)),
        median: Metric::from_f64(quantile(&values, 0.5)),
        q3: Metric::from_f64(quantile(&values, 0.75)),
        max: Metric::from_f64(values[n - 1]),
    }
}

/// Linear interpolation between the order statistics around `q * (n - 1)`.
/// `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSelection};
    use crate::data::loader::load_reader;
    use crate::data::model::CampaignDataset;

    fn dataset(csv: &str) -> CampaignDataset {
        load_reader(csv.as_bytes()).unwrap()
    }

    fn summarize_all(ds: &CampaignDataset) -> Vec<CacSummary> {
        let idx = filtered_indices(ds, &FilterSelection::all(ds));
        summarize_cac(&FilteredView::new(ds, &idx))
    }

    #[test]
    fn groups_are_sorted_and_described() {
        let ds = dataset(
            "Marketing_Channel,Marketing_Spend,New_Customers\n\
             TV,100,10\n\
             Email,10,1\n\
             TV,200,10\n\
             TV,300,10\n\
             TV,400,10\n",
        );
        let summary = summarize_all(&ds);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].channel, "Email");
        assert_eq!(summary[1].channel, "TV");

        let tv = &summary[1];
        assert_eq!(tv.count, 4);
        assert_eq!(tv.mean, Metric::Defined(25.0));
        assert_eq!(tv.min, Metric::Defined(10.0));
        assert_eq!(tv.q1, Metric::Defined(17.5));
        assert_eq!(tv.median, Metric::Defined(25.0));
        assert_eq!(tv.q3, Metric::Defined(32.5));
        assert_eq!(tv.max, Metric::Defined(40.0));
        let std = tv.std.value().unwrap();
        assert!((std - 12.909944487358056).abs() < 1e-9);
    }

    #[test]
    fn single_member_group_has_undefined_std() {
        let ds = dataset("Marketing_Channel,Marketing_Spend,New_Customers\nEmail,100,10\n");
        let summary = summarize_all(&ds);
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].std, Metric::Undefined);
        assert_eq!(summary[0].median, Metric::Defined(10.0));
    }

    #[test]
    fn zero_customer_rows_do_not_break_their_group() {
        let ds = dataset(
            "Marketing_Channel,Marketing_Spend,New_Customers\n\
             Email,100,10\n\
             Social,200,0\n\
             Social,100,10\n",
        );
        let summary = summarize_all(&ds);
        let social = &summary[1];
        assert_eq!(social.channel, "Social");
        assert_eq!(social.count, 2);
        assert_eq!(social.min, Metric::Defined(10.0));
        assert_eq!(social.mean, Metric::Undefined);
        assert_eq!(social.std, Metric::Undefined);
        assert_eq!(social.max, Metric::Undefined);
    }

    #[test]
    fn empty_view_has_empty_summary() {
        let ds = dataset("Marketing_Channel,Marketing_Spend,New_Customers\nEmail,100,10\n");
        let summary = summarize_cac(&FilteredView::new(&ds, &[]));
        assert!(summary.is_empty());
    }
}
