/// Camera snapshot downloads
///
/// Each snapshot is fetched over plain HTTP GET, then decoded with the
/// image crate on a blocking thread so a broken JPEG shows up as a failed
/// card instead of a blank one. A semaphore caps how many downloads run
/// at once so a refresh tick does not fire hundreds of requests together.

use std::sync::Arc;

use iced::widget::image::Handle;
use tokio::sync::Semaphore;

use crate::error::SnapshotError;

/// A decoded camera frame ready for the image widget
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub handle: Handle,
}

/// Shared downloader: one HTTP client plus the concurrency limit
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl SnapshotLoader {
    pub fn new(client: reqwest::Client, max_concurrent: usize) -> Self {
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Download and decode the snapshot at `url`
    pub async fn load(self, url: String) -> Result<Snapshot, SnapshotError> {
        let bytes = {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|e| SnapshotError::Network(e.to_string()))?;

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| SnapshotError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SnapshotError::Status(status.as_u16()));
            }

            response
                .bytes()
                .await
                .map_err(|e| SnapshotError::Network(e.to_string()))?
        };

        tracing::debug!("Downloaded {} ({} KB)", url, bytes.len() / 1024);
        decode(bytes.to_vec()).await
    }
}

/// Decode image bytes into an RGBA handle
pub async fn decode(bytes: Vec<u8>) -> Result<Snapshot, SnapshotError> {
    // Spawn blocking because JPEG decoding is CPU-intensive
    tokio::task::spawn_blocking(move || decode_blocking(&bytes))
        .await
        .map_err(|e| SnapshotError::Decode(format!("Task join error: {}", e)))?
}

fn decode_blocking(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    let img = image::load_from_memory(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Snapshot {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::feed::client::build_client;
    use crate::test_utils::{png_bytes, serve_once};

    fn dimensions(snapshot: &Snapshot) -> Option<(u32, u32)> {
        match &snapshot.handle {
            Handle::Rgba { width, height, .. } => Some((*width, *height)),
            _ => None,
        }
    }

    fn loader() -> SnapshotLoader {
        let client = build_client(&DashboardConfig::default()).unwrap();
        SnapshotLoader::new(client, 2)
    }

    #[tokio::test]
    async fn test_decode_png() {
        let snapshot = decode(png_bytes(4, 3)).await.unwrap();
        assert_eq!(dimensions(&snapshot), Some((4, 3)));
    }

    #[tokio::test]
    async fn test_decode_garbage() {
        let result = decode(b"definitely not an image".to_vec()).await;
        assert!(matches!(result, Err(SnapshotError::Decode(_))));
    }

    #[tokio::test]
    async fn test_load_snapshot() {
        let base = serve_once("200 OK", "image/png", png_bytes(8, 6)).await;
        let snapshot = loader().load(format!("{}/cam.png?t=1", base)).await.unwrap();
        assert_eq!(dimensions(&snapshot), Some((8, 6)));
    }

    #[tokio::test]
    async fn test_offline_camera() {
        let base = serve_once("404 Not Found", "text/plain", b"gone".to_vec()).await;
        let result = loader().load(format!("{}/cam.png?t=1", base)).await;
        assert_eq!(result.unwrap_err(), SnapshotError::Status(404));
    }
}
