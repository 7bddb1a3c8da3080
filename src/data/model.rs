use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const CHANNEL_COLUMN: &str = "Marketing_Channel";
pub const SPEND_COLUMN: &str = "Marketing_Spend";
pub const CUSTOMERS_COLUMN: &str = "New_Customers";

pub const CAC_COLUMN: &str = "CAC";
pub const CONVERSION_RATE_COLUMN: &str = "Conversion_Rate";
pub const BREAK_EVEN_COLUMN: &str = "Break_Even_Customers";

/// Columns computed by the deriver, appended after the source columns.
pub const DERIVED_COLUMNS: [&str; 3] = [CAC_COLUMN, CONVERSION_RATE_COLUMN, BREAK_EVEN_COLUMN];

// ---------------------------------------------------------------------------
// Metric – a derived value that may hit a division singularity
// ---------------------------------------------------------------------------

/// A derived ratio. `Undefined` is the sentinel for a zero denominator
/// (e.g. CAC of a row with no new customers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Defined(f64),
    Undefined,
}

impl Metric {
    /// `numerator / denominator`, or `Undefined` when the result is not finite.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Metric::Undefined;
        }
        Metric::from_f64(numerator / denominator)
    }

    /// Wrap a float, mapping NaN and infinities to `Undefined`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Metric::Defined(value)
        } else {
            Metric::Undefined
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(v),
            Metric::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Metric::Undefined)
    }

    /// Token written to exported CSV files.
    pub fn to_csv_field(self) -> String {
        match self {
            Metric::Defined(v) => v.to_string(),
            Metric::Undefined => "inf".to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Defined(v) => write!(f, "{v:.2}"),
            Metric::Undefined => write!(f, "undefined"),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceRow – one row as read from the file
// ---------------------------------------------------------------------------

/// One input row. `fields` keeps the raw cell text of every source column
/// (in `CampaignDataset::source_columns` order) so exports reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub channel: String,
    pub spend: f64,
    pub new_customers: u64,
    pub fields: Vec<String>,
}

/// The three columns computed from a row's own spend and customer count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub cac: Metric,
    pub conversion_rate: Metric,
    pub break_even_customers: Metric,
}

// ---------------------------------------------------------------------------
// CampaignRecord – a source row with its derived metrics attached
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRecord {
    pub source: SourceRow,
    pub metrics: DerivedMetrics,
}

impl CampaignRecord {
    pub fn channel(&self) -> &str {
        &self.source.channel
    }

    pub fn spend(&self) -> f64 {
        self.source.spend
    }

    pub fn new_customers(&self) -> u64 {
        self.source.new_customers
    }
}

// ---------------------------------------------------------------------------
// CampaignDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table with derived metrics. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignDataset {
    /// Source column names in file order (derived columns excluded).
    pub source_columns: Vec<String>,
    /// All records in file order.
    pub records: Vec<CampaignRecord>,
    /// Distinct channels in order of first appearance.
    pub channels: Vec<String>,
}

impl CampaignDataset {
    /// Build the channel index from the records.
    pub fn new(source_columns: Vec<String>, records: Vec<CampaignRecord>) -> Self {
        let mut channels: Vec<String> = Vec::new();
        for rec in &records {
            if !channels.iter().any(|c| c == rec.channel()) {
                channels.push(rec.channel().to_string());
            }
        }
        CampaignDataset {
            source_columns,
            records,
            channels,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `(min, max)` of `New_Customers`, `None` for an empty table.
    pub fn customer_bounds(&self) -> Option<(u64, u64)> {
        let min = self.records.iter().map(|r| r.new_customers()).min()?;
        let max = self.records.iter().map(|r| r.new_customers()).max()?;
        Some((min, max))
    }

    /// Source columns followed by the derived ones.
    pub fn all_columns(&self) -> Vec<&str> {
        self.source_columns
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(channel: &str, customers: u64) -> CampaignRecord {
        CampaignRecord {
            source: SourceRow {
                channel: channel.to_string(),
                spend: 1.0,
                new_customers: customers,
                fields: Vec::new(),
            },
            metrics: DerivedMetrics {
                cac: Metric::Undefined,
                conversion_rate: Metric::Undefined,
                break_even_customers: Metric::Undefined,
            },
        }
    }

    #[test]
    fn ratio_with_zero_denominator_is_undefined() {
        assert_eq!(Metric::ratio(200.0, 0.0), Metric::Undefined);
        assert_eq!(Metric::ratio(100.0, 10.0), Metric::Defined(10.0));
        assert_eq!(Metric::from_f64(f64::NAN), Metric::Undefined);
    }

    #[test]
    fn undefined_is_visible_in_display_and_csv() {
        assert_eq!(Metric::Undefined.to_string(), "undefined");
        assert_eq!(Metric::Undefined.to_csv_field(), "inf");
        assert_eq!(Metric::Defined(12.5).to_csv_field(), "12.5");
    }

    #[test]
    fn channels_keep_first_appearance_order() {
        let ds = CampaignDataset::new(
            Vec::new(),
            vec![record("Social", 3), record("Email", 9), record("Social", 1)],
        );
        assert_eq!(ds.channels, vec!["Social", "Email"]);
        assert_eq!(ds.customer_bounds(), Some((1, 9)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = CampaignDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.customer_bounds(), None);
    }
}
