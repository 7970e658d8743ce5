/// Error types for the camera dashboard
///
/// Both enums are `Clone` so they can ride inside iced messages.

use thiserror::Error;

/// Text shown in place of the grid whenever the catalog fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load cameras. Please try again later.";

/// Errors that can occur while fetching the camera catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout...)
    #[error("Network error: {0}")]
    Network(String),
    /// The service answered with a non-success status
    #[error("Feature service returned HTTP {0}")]
    Status(u16),
    /// The body was not the JSON shape we expect
    #[error("Failed to parse feature response: {0}")]
    Parse(String),
    /// The service reported an error inside a 200 response
    #[error("Feature service error: {0}")]
    Service(String),
}

impl FetchError {
    /// The message the user sees. Details only go to the log.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Errors that can occur while loading a single camera snapshot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Image server returned HTTP {0}")]
    Status(u16),
    #[error("Failed to decode image: {0}")]
    Decode(String),
}
