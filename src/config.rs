/// Runtime configuration for the dashboard
///
/// Everything has a fixed default. The feed endpoint is the one value
/// that can be overridden, through `TRAFFIC_CAMS_FEED_URL`.

use std::time::Duration;
use url::Url;

/// Default ArcGIS feature layer holding the city's traffic cameras
pub const DEFAULT_FEED_URL: &str =
    "https://gis.toronto.ca/arcgis/rest/services/cot_geospatial2/FeatureServer/3/query";

/// Environment variable that replaces the feed endpoint
pub const FEED_URL_ENV: &str = "TRAFFIC_CAMS_FEED_URL";

/// Attribute fields requested from the feature service
pub const OUT_FIELDS: &str = "OBJECTID,IMAGEURL,MAINROAD,CROSSROAD,DIRECTION1";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Feature query endpoint (without parameters)
    pub feed_url: String,
    /// Maximum number of cameras requested in the single fetch
    pub record_limit: u32,
    /// Period of the live refresh tick
    pub refresh_interval: Duration,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Snapshot downloads allowed in flight at once
    pub max_concurrent_snapshots: usize,
    /// Delay between the entrance of consecutive cards
    pub stagger_step: Duration,
    /// Length of a card's fade-in
    pub fade_duration: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            record_limit: 300,
            refresh_interval: Duration::from_secs(15),
            request_timeout: Duration::from_secs(20),
            max_concurrent_snapshots: 8,
            stagger_step: Duration::from_millis(20),
            fade_duration: Duration::from_millis(300),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the feed endpoint taken from the environment if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                tracing::info!("Using feed endpoint from {}: {}", FEED_URL_ENV, url);
                config.feed_url = url.to_string();
            }
        }
        config
    }

    /// Build the full catalog query URL
    pub fn query_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.feed_url)?;
        url.query_pairs_mut()
            .append_pair("where", "1=1")
            .append_pair("outFields", OUT_FIELDS)
            .append_pair("f", "json")
            .append_pair("returnGeometry", "true")
            .append_pair("orderByFields", "MAINROAD ASC")
            .append_pair("resultRecordCount", &self.record_limit.to_string());
        Ok(url)
    }
}
