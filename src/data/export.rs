use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;
use super::model::Metric;

/// File name offered by the download dialog.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Media type of the exported document.
pub const EXPORT_MIME: &str = "text/csv";

// ---------------------------------------------------------------------------
// CSV export of the filtered view
// ---------------------------------------------------------------------------

/// Write the view as CSV: source columns in file order (raw text kept),
/// then the derived columns. Header always present.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(view.dataset.all_columns())
        .context("writing CSV header")?;

    for rec in view.records() {
        let m = &rec.metrics;
        let derived = [m.cac, m.conversion_rate, m.break_even_customers].map(Metric::to_csv_field);
        let fields = rec.source.fields.iter().chain(derived.iter());
        wtr.write_record(fields)
            .with_context(|| format!("writing row for channel '{}'", rec.channel()))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Serialize the view into an in-memory CSV document.
pub fn to_csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

/// Write the view to `path`.
pub fn save_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(view)?;
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Exported {} rows ({EXPORT_MIME}) to {}",
        view.len(),
        path.display()
    );
    Ok(())
}
