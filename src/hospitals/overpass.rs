//! Overpass API client for nearby hospitals

use crate::errors::{Result, ScreenerError};
use crate::hospitals::Hospital;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";
const UNNAMED: &str = "Unnamed Hospital";

/// Source of hospitals around a coordinate
#[async_trait]
pub trait NearbySearch: Send + Sync {
    async fn find_nearby(&self, latitude: f64, longitude: f64, radius_m: u32) -> Result<Vec<Hospital>>;
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

/// Overpass QL for hospital nodes, ways and relations within `radius_m`
pub fn build_query(latitude: f64, longitude: f64, radius_m: u32) -> String {
    let around = format!("(around:{},{},{})", radius_m, latitude, longitude);
    format!(
        "[out:json];\n(\n  node[\"amenity\"=\"hospital\"]{a};\n  way[\"amenity\"=\"hospital\"]{a};\n  relation[\"amenity\"=\"hospital\"]{a};\n);\nout center;\n",
        a = around
    )
}

/// Keep the first `max_results` elements that carry coordinates.
///
/// Ways and relations only have a `center`.
fn parse_elements(body: &str, max_results: usize) -> Result<Vec<Hospital>> {
    let response: OverpassResponse = serde_json::from_str(body)
        .map_err(|e| ScreenerError::Transport(format!("malformed Overpass response: {}", e)))?;

    Ok(response
        .elements
        .into_iter()
        .take(max_results)
        .filter_map(|el| {
            let (lat, lon) = match (el.lat, el.lon, &el.center) {
                (Some(lat), Some(lon), _) => (lat, lon),
                (_, _, Some(c)) => (c.lat, c.lon),
                _ => return None,
            };
            let name = el
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| UNNAMED.to_string());
            Some(Hospital {
                name,
                latitude: lat,
                longitude: lon,
            })
        })
        .collect())
}

/// HTTP client for the Overpass interpreter endpoint
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    max_results: usize,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, max_results: usize) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
            max_results,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check that the endpoint answers at all
    pub async fn is_reachable(&self) -> bool {
        self.client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new(DEFAULT_OVERPASS_URL, Duration::from_secs(25), 10)
    }
}

#[async_trait]
impl NearbySearch for OverpassClient {
    async fn find_nearby(&self, latitude: f64, longitude: f64, radius_m: u32) -> Result<Vec<Hospital>> {
        let query = build_query(latitude, longitude, radius_m);
        debug!(endpoint = %self.endpoint, radius_m, "querying Overpass");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| ScreenerError::Transport(format!("Failed to reach Overpass: {}", e)))?;

        if !response.status().is_success() {
            return Err(ScreenerError::Transport(format!(
                "Overpass API error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScreenerError::Transport(format!("Failed to read response: {}", e)))?;

        parse_elements(&body, self.max_results)
    }
}
