use serde::Deserialize;

use crate::error::FetchError;
use crate::state::data::CameraRecord;

/// Body of a feature query response (`f=json`)
#[derive(Debug, Deserialize, Default)]
pub struct FeatureResponse {
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
    /// Present instead of `features` when the service rejects the query
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub attributes: Attributes,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Attribute names as the layer publishes them
#[derive(Debug, Deserialize)]
pub struct Attributes {
    #[serde(rename = "OBJECTID")]
    pub object_id: Option<i64>,
    #[serde(rename = "IMAGEURL")]
    pub image_url: Option<String>,
    #[serde(rename = "MAINROAD")]
    pub main_road: Option<String>,
    #[serde(rename = "CROSSROAD")]
    pub cross_road: Option<String>,
    #[serde(rename = "DIRECTION1")]
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Parse a response body into camera records.
///
/// Missing optional fields become empty/None. A missing `features` array is
/// an empty catalog. Features without an OBJECTID are skipped.
pub fn parse_features(body: &[u8]) -> Result<Vec<CameraRecord>, FetchError> {
    let response: FeatureResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if let Some(error) = response.error {
        let message = error.message.unwrap_or_else(|| "unknown error".to_string());
        return Err(FetchError::Service(match error.code {
            Some(code) => format!("{} (code {})", message, code),
            None => message,
        }));
    }

    let features = response.features.unwrap_or_default();
    let mut records = Vec::with_capacity(features.len());
    for feature in features {
        match into_record(feature) {
            Some(record) => records.push(record),
            None => tracing::warn!("Skipping camera feature without OBJECTID"),
        }
    }
    Ok(records)
}

fn into_record(feature: Feature) -> Option<CameraRecord> {
    let attributes = feature.attributes;
    let id = attributes.object_id?;
    let (x, y) = match feature.geometry {
        Some(geometry) => (geometry.x, geometry.y),
        None => (None, None),
    };

    Some(CameraRecord {
        id,
        image_url: attributes.image_url.unwrap_or_default(),
        main_road: attributes.main_road.unwrap_or_default(),
        cross_road: non_empty(attributes.cross_road),
        direction: non_empty(attributes.direction),
        x,
        y,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
