use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::derive::derive_dataset;
use super::model::{
    CampaignDataset, SourceRow, CHANNEL_COLUMN, CUSTOMERS_COLUMN, DERIVED_COLUMNS, SPEND_COLUMN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not {expected}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a marketing dataset from a CSV file and derive its metrics.
///
/// The header row must contain `Marketing_Channel`, `Marketing_Spend` and
/// `New_Customers`. Other columns are kept verbatim; `CAC`,
/// `Conversion_Rate` and `Break_Even_Customers` columns (as found in an
/// exported file) are dropped and recomputed.
pub fn load_file(path: &Path) -> Result<CampaignDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Same as [`load_file`] for any byte source.
pub fn load_reader<R: Read>(reader: R) -> Result<CampaignDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let channel_idx = position(CHANNEL_COLUMN)?;
    let spend_idx = position(SPEND_COLUMN)?;
    let customers_idx = position(CUSTOMERS_COLUMN)?;

    // Indices of the columns kept as source data.
    let kept: Vec<usize> = (0..headers.len())
        .filter(|&i| !DERIVED_COLUMNS.contains(&headers[i].as_str()))
        .collect();
    let source_columns: Vec<String> = kept.iter().map(|&i| headers[i].clone()).collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let channel = cell(channel_idx).to_string();
        let spend = parse_spend(cell(spend_idx), row_no)?;
        let new_customers = parse_customers(cell(customers_idx), row_no)?;
        let fields = kept.iter().map(|&i| cell(i).to_string()).collect();

        rows.push(SourceRow {
            channel,
            spend,
            new_customers,
            fields,
        });
    }

    Ok(derive_dataset(source_columns, rows))
}

fn parse_spend(s: &str, row: usize) -> Result<f64, LoadError> {
    s.trim().parse::<f64>().map_err(|_| LoadError::InvalidValue {
        row,
        column: SPEND_COLUMN,
        value: s.to_string(),
        expected: "a number",
    })
}

/// Accepts integral floats such as `12.0`, which spreadsheet exports produce.
fn parse_customers(s: &str, row: usize) -> Result<u64, LoadError> {
    let s_trim = s.trim();
    if let Ok(n) = s_trim.parse::<u64>() {
        return Ok(n);
    }
    match s_trim.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(LoadError::InvalidValue {
            row,
            column: CUSTOMERS_COLUMN,
            value: s.to_string(),
            expected: "a non-negative integer",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Metric;

    #[test]
    fn loads_rows_in_file_order() {
        let csv = "Marketing_Channel,Marketing_Spend,New_Customers\n\
                   Email,100,10\n\
                   Social,200,0\n\
                   Email,300.5,12\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.channels, vec!["Email", "Social"]);
        assert_eq!(ds.records[2].spend(), 300.5);
        assert_eq!(ds.records[0].metrics.cac, Metric::Defined(10.0));
        assert_eq!(ds.records[1].metrics.cac, Metric::Undefined);
    }

    #[test]
    fn extra_columns_pass_through_and_derived_are_recomputed() {
        let csv = "Region,Marketing_Channel,Marketing_Spend,New_Customers,CAC\n\
                   North,Email,100,10,999\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            ds.source_columns,
            vec!["Region", "Marketing_Channel", "Marketing_Spend", "New_Customers"]
        );
        assert_eq!(ds.records[0].source.fields, vec!["North", "Email", "100", "10"]);
        assert_eq!(ds.records[0].metrics.cac, Metric::Defined(10.0));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Marketing_Channel,Marketing_Spend\nEmail,100\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(CUSTOMERS_COLUMN)));
    }

    #[test]
    fn non_numeric_spend_is_rejected() {
        let csv = "Marketing_Channel,Marketing_Spend,New_Customers\nEmail,lots,10\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, SPEND_COLUMN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn customers_accept_integral_floats_only() {
        assert_eq!(parse_customers("12.0", 0).unwrap(), 12);
        assert!(parse_customers("-3", 0).is_err());
        assert!(parse_customers("2.5", 0).is_err());
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let csv = "Marketing_Channel,Marketing_Spend,New_Customers\nEmail,100\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn absent_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let csv = "Marketing_Channel,Marketing_Spend,New_Customers\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.channels.is_empty());
    }
}
