use crate::cleaner::{clean_with_report, CleanReport};
use crate::error::{DashboardError, Result};
use crate::types::{CleanRecord, RawRecord};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

/// Read every row of the delivery CSV without interpreting its text fields.
///
/// A row that does not fit the expected columns fails the load; nothing is
/// skipped here, that is the cleaner's job.
pub fn load_raw(path: &Path) -> Result<Vec<RawRecord>> {
    let read_err = |source: csv::Error| DashboardError::DatasetRead {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(read_err)?;

    let rows = rdr
        .deserialize::<RawRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_err)?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn load_and_clean(path: &Path) -> Result<(Vec<CleanRecord>, CleanReport)> {
    let raw = load_raw(path)?;
    clean_with_report(&raw)
}
