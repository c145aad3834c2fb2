//! Hospital lookup shown after a screening
//!
//! Queries OpenStreetMap through Overpass and falls back to a local CSV table
//! whenever the online lookup fails or finds nothing.

pub mod locator;
pub mod offline;
pub mod overpass;

use serde::{Deserialize, Serialize};

pub use locator::{HospitalListing, HospitalLocator};
pub use offline::{load_offline_table, OfflineHospital, DEFAULT_OFFLINE_ROWS};
pub use overpass::{build_query, NearbySearch, OverpassClient, DEFAULT_OVERPASS_URL};

/// Hospital found by the online lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
