//! Online lookup with offline fallback

use crate::hospitals::offline::{load_offline_table, OfflineHospital};
use crate::hospitals::overpass::NearbySearch;
use crate::hospitals::Hospital;
use std::path::PathBuf;
use tracing::{info, warn};

/// What the user is shown after scoring
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalListing {
    Online(Vec<Hospital>),
    Offline {
        reason: String,
        hospitals: Vec<OfflineHospital>,
    },
    /// Both sources failed
    Unavailable { reason: String },
}

pub struct HospitalLocator {
    search: Box<dyn NearbySearch>,
    offline_path: PathBuf,
    radius_m: u32,
    offline_rows: usize,
}

impl HospitalLocator {
    pub fn new(
        search: Box<dyn NearbySearch>,
        offline_path: impl Into<PathBuf>,
        radius_m: u32,
        offline_rows: usize,
    ) -> Self {
        Self {
            search,
            offline_path: offline_path.into(),
            radius_m,
            offline_rows,
        }
    }

    /// Query online once; empty results or any failure fall back to the table
    pub async fn locate(&self, latitude: f64, longitude: f64) -> HospitalListing {
        match self.search.find_nearby(latitude, longitude, self.radius_m).await {
            Ok(hospitals) if !hospitals.is_empty() => {
                info!(found = hospitals.len(), "hospitals found online");
                HospitalListing::Online(hospitals)
            }
            Ok(_) => self.offline("No hospitals found in OpenStreetMap data.".to_string()),
            Err(e) => {
                warn!(error = %e, "online hospital lookup failed");
                self.offline(format!("OpenStreetMap API error: {}", e))
            }
        }
    }

    /// Offline table only, e.g. when coordinates could not be read
    pub fn offline(&self, reason: String) -> HospitalListing {
        match load_offline_table(&self.offline_path, self.offline_rows) {
            Ok(hospitals) => HospitalListing::Offline { reason, hospitals },
            Err(e) => {
                warn!(error = %e, "offline hospital table unavailable");
                HospitalListing::Unavailable {
                    reason: format!("{}; Error loading hospital list: {}", reason, e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Result, ScreenerError};
    use async_trait::async_trait;
    use tempfile::TempDir;

    enum Canned {
        Found(Vec<Hospital>),
        Empty,
        Down,
    }

    #[async_trait]
    impl NearbySearch for Canned {
        async fn find_nearby(&self, _lat: f64, _lon: f64, _radius: u32) -> Result<Vec<Hospital>> {
            match self {
                Canned::Found(h) => Ok(h.clone()),
                Canned::Empty => Ok(Vec::new()),
                Canned::Down => Err(ScreenerError::Transport("timed out".into())),
            }
        }
    }

    fn table(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("hospitals.csv");
        std::fs::write(&path, "Hospital,City,State\nAIIMS,New Delhi,Delhi\nKEM,Mumbai,Maharashtra\n")
            .unwrap();
        path
    }

    fn hospital() -> Hospital {
        Hospital {
            name: "City Hospital".into(),
            latitude: 28.61,
            longitude: 77.31,
        }
    }

    #[tokio::test]
    async fn test_online_results_used() {
        let dir = TempDir::new().unwrap();
        let locator = HospitalLocator::new(Box::new(Canned::Found(vec![hospital()])), table(&dir), 5000, 5);
        assert_eq!(locator.locate(28.6, 77.3).await, HospitalListing::Online(vec![hospital()]));
    }

    #[tokio::test]
    async fn test_empty_results_fall_back() {
        let dir = TempDir::new().unwrap();
        let locator = HospitalLocator::new(Box::new(Canned::Empty), table(&dir), 5000, 5);
        match locator.locate(28.6, 77.3).await {
            HospitalListing::Offline { hospitals, .. } => assert_eq!(hospitals.len(), 2),
            other => panic!("expected offline listing, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_falls_back() {
        let dir = TempDir::new().unwrap();
        let locator = HospitalLocator::new(Box::new(Canned::Down), table(&dir), 5000, 1);
        match tokio_test::block_on(locator.locate(0.0, 0.0)) {
            HospitalListing::Offline { reason, hospitals } => {
                assert!(reason.contains("timed out"));
                assert_eq!(hospitals.len(), 1);
            }
            other => panic!("expected offline listing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_both_sources_down() {
        let dir = TempDir::new().unwrap();
        let locator = HospitalLocator::new(Box::new(Canned::Down), dir.path().join("none.csv"), 5000, 5);
        assert!(matches!(
            locator.locate(0.0, 0.0).await,
            HospitalListing::Unavailable { .. }
        ));
    }
}
