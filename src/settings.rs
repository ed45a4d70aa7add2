use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;
use crate::filter::{FilterOptions, TRAFFIC_LEVELS};

/// Delivery growth dashboard: company, deliverers and restaurants views
#[derive(Parser, Debug, Clone)]
#[command(name = "delivery-dashboard", version)]
pub struct Settings {
    /// Delivery dataset (CSV)
    #[arg(long, env = "DASHBOARD_DATA", default_value = "dataset/train.csv")]
    pub data: PathBuf,

    /// Directory that receives exported tables
    #[arg(long, default_value = "reports")]
    pub out_dir: PathBuf,

    /// Keep orders placed before this date (DD-MM-YYYY)
    #[arg(long, default_value = "13-03-2022")]
    pub until: String,

    /// Traffic densities to keep
    #[arg(long, value_delimiter = ',', default_values = TRAFFIC_LEVELS)]
    pub traffic: Vec<String>,

    /// Weather conditions to keep (all when omitted)
    #[arg(long, value_delimiter = ',')]
    pub weather: Vec<String>,

    /// Rows shown per table preview
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Orders per day, week, traffic and city
    Company,
    /// Ratings, ages and delivery-time rankings
    Deliverers,
    /// Delivery times, festival impact and distances
    Restaurants,
    /// Export the cleaned and filtered dataset
    Clean,
}

impl Settings {
    pub fn filter_options(&self) -> Result<FilterOptions> {
        FilterOptions::from_cli(&self.until, &self.traffic, &self.weather)
    }
}

/// Initialise the global `tracing` subscriber on stderr.
///
/// Unknown level names fall back to `info`.
pub fn setup_logging(log_level: &str) {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    };
    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();
}
