/// Per-card image load state
///
/// One entry per camera ID, keyed to the exact snapshot URL (cache-bust
/// token included) it was last asked to show. A new URL puts the card back
/// to `Pending`; results for any other URL are stale and ignored.

use std::collections::HashMap;

use crate::error::SnapshotError;
use crate::feed::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLoadState {
    Pending,
    Loaded,
    Failed,
}

/// What a card (or the viewer) should draw right now
#[derive(Debug, Clone, Copy)]
pub enum CardView<'a> {
    /// Nothing to show yet: "Loading..."
    Loading,
    /// Last load failed: "Camera Offline"
    Offline,
    /// A decoded frame. While a refresh is pending this is the previous
    /// frame, so placeholders never flash over a loaded image.
    Image {
        snapshot: &'a Snapshot,
        refreshing: bool,
    },
}

/// Outcome of handing a download result to [`CardStates::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(CardLoadState),
    /// The card has moved on to a newer URL
    Stale,
    /// No such card (the catalog was replaced meanwhile)
    Unknown,
}

#[derive(Debug)]
struct CardEntry {
    /// URL the card currently wants to show
    url: String,
    status: CardLoadState,
    /// URL of the download in flight, if any
    in_flight: Option<String>,
    /// Most recent successfully decoded frame
    snapshot: Option<Snapshot>,
}

#[derive(Debug, Default)]
pub struct CardStates {
    entries: HashMap<i64, CardEntry>,
}

impl CardStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point a card at `url`. Returns true when the caller should start a
    /// download: the card is pending and has nothing in flight. At most one
    /// download per card is outstanding at any time.
    pub fn prepare(&mut self, id: i64, url: &str) -> bool {
        let entry = self.entries.entry(id).or_insert_with(|| CardEntry {
            url: url.to_string(),
            status: CardLoadState::Pending,
            in_flight: None,
            snapshot: None,
        });

        if entry.url != url {
            entry.url = url.to_string();
            entry.status = CardLoadState::Pending;
        }

        if entry.status == CardLoadState::Pending && entry.in_flight.is_none() {
            entry.in_flight = Some(url.to_string());
            return true;
        }
        false
    }

    /// Record the result of the download for `url`
    pub fn resolve(
        &mut self,
        id: i64,
        url: &str,
        result: Result<Snapshot, SnapshotError>,
    ) -> Resolution {
        let Some(entry) = self.entries.get_mut(&id) else {
            return Resolution::Unknown;
        };

        if entry.in_flight.as_deref() == Some(url) {
            entry.in_flight = None;
        }
        if entry.url != url {
            return Resolution::Stale;
        }

        match result {
            Ok(snapshot) => {
                entry.snapshot = Some(snapshot);
                entry.status = CardLoadState::Loaded;
            }
            Err(err) => {
                tracing::debug!("Camera {} offline: {}", id, err);
                entry.snapshot = None;
                entry.status = CardLoadState::Failed;
            }
        }
        Resolution::Applied(entry.status)
    }

    /// Load state of a card for the URL it should currently show
    pub fn status(&self, id: i64, url: &str) -> CardLoadState {
        match self.entries.get(&id) {
            Some(entry) if entry.url == url => entry.status,
            _ => CardLoadState::Pending,
        }
    }

    pub fn view(&self, id: i64, url: &str) -> CardView<'_> {
        let Some(entry) = self.entries.get(&id) else {
            return CardView::Loading;
        };

        match (self.status(id, url), entry.snapshot.as_ref()) {
            (CardLoadState::Failed, _) => CardView::Offline,
            (CardLoadState::Loaded, Some(snapshot)) => CardView::Image {
                snapshot,
                refreshing: false,
            },
            (_, Some(snapshot)) => CardView::Image {
                snapshot,
                refreshing: true,
            },
            (_, None) => CardView::Loading,
        }
    }

    /// Downloads currently outstanding
    pub fn in_flight(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.in_flight.is_some())
            .count()
    }

    /// Forget every card (the catalog was replaced)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;

    fn frame() -> Snapshot {
        Snapshot {
            handle: Handle::from_rgba(1, 1, vec![255_u8; 4]),
        }
    }

    fn offline() -> SnapshotError {
        SnapshotError::Status(404)
    }

    #[test]
    fn test_prepare_starts_one_download() {
        let mut cards = CardStates::new();
        assert!(cards.prepare(1, "http://cams/1.jpg?t=1"));
        // Same URL, already in flight
        assert!(!cards.prepare(1, "http://cams/1.jpg?t=1"));
        assert_eq!(cards.status(1, "http://cams/1.jpg?t=1"), CardLoadState::Pending);
        assert_eq!(cards.in_flight(), 1);
        assert!(matches!(cards.view(1, "http://cams/1.jpg?t=1"), CardView::Loading));
    }

    #[test]
    fn test_loaded_then_refreshed() {
        let mut cards = CardStates::new();
        cards.prepare(1, "u?t=1");
        assert_eq!(cards.resolve(1, "u?t=1", Ok(frame())), Resolution::Applied(CardLoadState::Loaded));
        assert!(!cards.prepare(1, "u?t=1"));
        assert!(matches!(
            cards.view(1, "u?t=1"),
            CardView::Image { refreshing: false, .. }
        ));

        // New token: back to pending, but the old frame stays on screen
        assert!(cards.prepare(1, "u?t=2"));
        assert_eq!(cards.status(1, "u?t=2"), CardLoadState::Pending);
        assert!(matches!(
            cards.view(1, "u?t=2"),
            CardView::Image { refreshing: true, .. }
        ));
    }

    #[test]
    fn test_failed_card_recovers_on_next_url() {
        let mut cards = CardStates::new();
        cards.prepare(3, "u?t=1");
        cards.resolve(3, "u?t=1", Err(offline()));
        assert_eq!(cards.status(3, "u?t=1"), CardLoadState::Failed);
        assert!(matches!(cards.view(3, "u?t=1"), CardView::Offline));
        // Failed is not retried at the same URL
        assert!(!cards.prepare(3, "u?t=1"));

        assert!(cards.prepare(3, "u?t=2"));
        assert!(matches!(cards.view(3, "u?t=2"), CardView::Loading));
        cards.resolve(3, "u?t=2", Ok(frame()));
        assert_eq!(cards.status(3, "u?t=2"), CardLoadState::Loaded);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut cards = CardStates::new();
        cards.prepare(1, "u?t=1");
        // Token moved on while the first download was still running
        assert!(!cards.prepare(1, "u?t=2"));

        assert_eq!(cards.resolve(1, "u?t=1", Err(offline())), Resolution::Stale);
        assert_eq!(cards.status(1, "u?t=2"), CardLoadState::Pending);
        assert_eq!(cards.in_flight(), 0);

        // Now the current URL can be fetched
        assert!(cards.prepare(1, "u?t=2"));
    }

    #[test]
    fn test_unknown_card_after_clear() {
        let mut cards = CardStates::new();
        cards.prepare(5, "u?t=1");
        cards.clear();
        assert_eq!(cards.resolve(5, "u?t=1", Ok(frame())), Resolution::Unknown);
        assert_eq!(cards.in_flight(), 0);
    }
}
