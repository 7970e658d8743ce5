/// Session controller
///
/// Owns everything the dashboard knows: the catalog, the user's search and
/// sort choice, the refresh token, the viewer and the per-card load states.
/// Every mutation recomputes the visible list (if its inputs changed) and
/// returns the snapshot downloads the UI shell has to start.

use super::cards::{CardStates, CardView, Resolution};
use super::catalog::{CameraCatalog, FetchOutcome};
use super::data::{CameraRecord, ImageRequest, SortKey};
use super::filter::VisibleList;
use super::viewer::Viewer;
use crate::error::{FetchError, SnapshotError};
use crate::feed::snapshot::Snapshot;
use crate::refresh::{cache_busted, RefreshToken};

#[derive(Debug)]
pub struct Session {
    catalog: CameraCatalog,
    search_term: String,
    sort_key: SortKey,
    refresh: RefreshToken,
    viewer: Viewer,
    cards: CardStates,
    visible: VisibleList,
    ended: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            catalog: CameraCatalog::new(),
            search_term: String::new(),
            sort_key: SortKey::default(),
            refresh: RefreshToken::now(),
            viewer: Viewer::default(),
            cards: CardStates::new(),
            visible: VisibleList::default(),
            ended: false,
        }
    }

    // ========== Catalog ==========

    /// Start a (re)fetch of the catalog; the result must carry this generation
    pub fn begin_fetch(&mut self) -> u64 {
        self.catalog.begin_fetch()
    }

    pub fn finish_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<CameraRecord>, FetchError>,
    ) -> (FetchOutcome, Vec<ImageRequest>) {
        let outcome = self.catalog.finish_fetch(generation, result);
        if outcome == FetchOutcome::Stale {
            return (outcome, Vec::new());
        }

        // New catalog: old card states and selection belong to the old list
        self.cards.clear();
        if let Some(id) = self.viewer.selected() {
            if self.catalog.get(id).is_none() {
                self.viewer.close();
            }
        }
        if let FetchOutcome::Loaded(count) = outcome {
            tracing::info!("Loaded {} cameras.", count);
        }
        (outcome, self.sync())
    }

    // ========== Filter & sort ==========

    pub fn set_search_term(&mut self, term: String) -> Vec<ImageRequest> {
        self.search_term = term;
        self.sync()
    }

    pub fn set_sort_key(&mut self, key: SortKey) -> Vec<ImageRequest> {
        self.sort_key = key;
        self.sync()
    }

    // ========== Live refresh ==========

    /// One scheduler tick: every displayed snapshot gets a new URL
    pub fn refresh_tick(&mut self) -> Vec<ImageRequest> {
        let token = self.refresh.tick();
        let requests = self.sync();
        tracing::info!(
            "Refresh tick {}: {} downloads, {} still in flight",
            token,
            requests.len(),
            self.cards.in_flight()
        );
        requests
    }

    /// The session is over; the refresh timer must stop
    pub fn shutdown(&mut self) {
        self.ended = true;
        self.viewer.close();
    }

    /// Whether the refresh timer should be running
    pub fn is_live(&self) -> bool {
        !self.ended && self.catalog.is_ready()
    }

    // ========== Viewer ==========

    pub fn open_viewer(&mut self, id: i64) -> Vec<ImageRequest> {
        if self.catalog.get(id).is_none() {
            return Vec::new();
        }
        self.viewer.open(id);
        self.sync()
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    pub fn next(&mut self) -> Vec<ImageRequest> {
        if self.viewer.next(&self.visible) {
            self.sync()
        } else {
            Vec::new()
        }
    }

    pub fn prev(&mut self) -> Vec<ImageRequest> {
        if self.viewer.prev(&self.visible) {
            self.sync()
        } else {
            Vec::new()
        }
    }

    // ========== Snapshots ==========

    /// A download finished. Returns a follow-up request when the result was
    /// stale and the card is still on screen.
    pub fn snapshot_loaded(
        &mut self,
        id: i64,
        url: &str,
        result: Result<Snapshot, SnapshotError>,
    ) -> Vec<ImageRequest> {
        match self.cards.resolve(id, url, result) {
            Resolution::Applied(_) => Vec::new(),
            Resolution::Unknown => {
                tracing::debug!("Dropping snapshot for camera {} no longer in the catalog", id);
                Vec::new()
            }
            Resolution::Stale => {
                tracing::debug!("Dropping stale snapshot {}", url);
                self.sync()
            }
        }
    }

    /// Current URL for a camera's snapshot
    pub fn snapshot_url(&self, record: &CameraRecord) -> String {
        cache_busted(&record.image_url, self.refresh.value())
    }

    pub fn card_view(&self, record: &CameraRecord) -> CardView<'_> {
        self.cards.view(record.id, &self.snapshot_url(record))
    }

    // ========== Accessors ==========

    pub fn catalog(&self) -> &CameraCatalog {
        &self.catalog
    }

    pub fn visible(&self) -> &[CameraRecord] {
        self.visible.records()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    /// Record shown in the viewer, if it is open
    pub fn selected(&self) -> Option<&CameraRecord> {
        self.viewer.selected().and_then(|id| self.catalog.get(id))
    }

    /// Recompute the visible list and collect downloads for everything on
    /// screen: visible cards plus the viewer's camera. Hidden cards are
    /// fetched once they become visible again.
    fn sync(&mut self) -> Vec<ImageRequest> {
        self.visible.refresh(
            self.catalog.records(),
            self.catalog.revision(),
            &self.search_term,
            self.sort_key,
        );

        let token = self.refresh.value();
        let mut requests = Vec::new();
        let selected = self.viewer.selected().and_then(|id| self.catalog.get(id));
        let shown = self.visible.records().iter().chain(selected);

        for record in shown {
            let url = cache_busted(&record.image_url, token);
            if self.cards.prepare(record.id, &url) {
                requests.push(ImageRequest { id: record.id, url });
            }
        }
        requests
    }
}
