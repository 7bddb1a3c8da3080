use std::path::PathBuf;

use clap::Parser;

/// Conventional dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "customer_acquisition_cost_dataset.csv";

/// Environment variable overriding the dataset location.
pub const DATASET_ENV: &str = "CAC_DATASET";

/// Interactive dashboard over marketing spend and customer acquisition data.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cac-dashboard", version, about)]
pub struct DashboardConfig {
    /// CSV file with Marketing_Channel, Marketing_Spend and New_Customers columns
    #[arg(value_name = "DATASET", env = DATASET_ENV, default_value = DEFAULT_DATASET)]
    pub dataset_path: PathBuf,
}
