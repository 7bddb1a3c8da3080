/// Data layer: records, loading, derivation, filtering, summary and export.
///
/// Architecture:
/// ```text
///   customer_acquisition_cost_dataset.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SourceRow
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  CAC, conversion rate, break-even → CampaignDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  channels + customer range → FilteredView
///   └──────────┘
///        │
///        ├──► summary   per-channel CAC statistics
///        └──► export    CSV download
/// ```

pub mod derive;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
