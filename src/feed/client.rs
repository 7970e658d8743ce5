use url::Url;

use super::query::parse_features;
use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::state::data::CameraRecord;

/// Build the HTTP client shared by the catalog fetch and snapshot downloads.
///
/// reqwest::Client pools connections internally, so one instance (cloned
/// cheaply) serves every request to the camera servers.
pub fn build_client(config: &DashboardConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("traffic-cams/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .pool_max_idle_per_host(config.max_concurrent_snapshots)
        .build()
}

/// Fetch the camera catalog with one feature query.
///
/// # Returns
/// * `Ok(records)` - Every camera the service returned (possibly none)
/// * `Err(FetchError)` - Network failure, non-success status, or bad body
pub async fn fetch_cameras(
    client: reqwest::Client,
    query_url: Url,
) -> Result<Vec<CameraRecord>, FetchError> {
    tracing::debug!("Fetching cameras: {}", query_url);

    let response = client
        .get(query_url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::Network(format!("Failed to read response body: {}", e)))?;

    parse_features(&body)
}
