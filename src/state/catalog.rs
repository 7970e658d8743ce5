use super::data::CameraRecord;
use crate::error::FetchError;

/// The CameraCatalog holds every camera from the last completed fetch,
/// along with the loading/error status shown in place of the grid.
///
/// A fetch replaces the whole list; records are never patched in place.
/// Each fetch gets a generation number so a late answer to an older fetch
/// can be recognised and dropped.
#[derive(Debug)]
pub struct CameraCatalog {
    records: Vec<CameraRecord>,
    loading: bool,
    error: Option<String>,
    /// Generation of the most recently issued fetch
    generation: u64,
    /// Bumped every time `records` is replaced
    revision: u64,
}

/// What happened to a fetch result handed to [`CameraCatalog::finish_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records replaced the catalog
    Loaded(usize),
    /// The fetch failed; the catalog is now empty with an error message
    Failed,
    /// A newer fetch was issued since; this result was ignored
    Stale,
}

impl Default for CameraCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraCatalog {
    /// An empty catalog waiting for its first fetch
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
            generation: 0,
            revision: 0,
        }
    }

    /// Start a new fetch. Returns the generation the result must carry.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Apply the result of a fetch
    pub fn finish_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<CameraRecord>, FetchError>,
    ) -> FetchOutcome {
        if generation != self.generation {
            tracing::debug!(
                "Dropping catalog result from fetch #{} (latest is #{})",
                generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        self.revision += 1;

        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.error = None;
                FetchOutcome::Loaded(count)
            }
            Err(err) => {
                tracing::warn!("Error fetching cameras: {}", err);
                self.records.clear();
                self.error = Some(err.user_message().to_string());
                FetchOutcome::Failed
            }
        }
    }

    pub fn records(&self) -> &[CameraRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once a fetch has succeeded and nothing newer is pending
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    pub fn get(&self, id: i64) -> Option<&CameraRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}
