//! Local hospital table used when the online lookup fails

use crate::errors::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Rows shown from the offline table by default
pub const DEFAULT_OFFLINE_ROWS: usize = 5;

/// One row of the offline table; other columns are ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineHospital {
    #[serde(rename = "Hospital")]
    pub hospital: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
}

/// First `rows` entries of a CSV with `Hospital`, `City`, `State` columns
pub fn load_offline_table(path: impl AsRef<Path>, rows: usize) -> Result<Vec<OfflineHospital>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ScreenerError::load("hospital table", path.display().to_string(), e))?;
    read_offline_table(file, rows)
}

pub fn read_offline_table<R: Read>(reader: R, rows: usize) -> Result<Vec<OfflineHospital>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::with_capacity(rows);
    for record in csv.deserialize::<OfflineHospital>().take(rows) {
        out.push(record?);
    }
    Ok(out)
}
