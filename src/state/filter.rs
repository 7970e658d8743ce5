/// Filter-sort engine
///
/// Pure functions that turn the full catalog plus the current search term and
/// sort key into the ordered list of cameras on screen.

use std::cmp::Ordering;
use std::sync::OnceLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

use super::data::{CameraRecord, SortKey};

/// Does this camera match the (case-insensitive) search term?
/// An empty term matches everything.
pub fn matches(record: &CameraRecord, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    record
        .search_text()
        .to_lowercase()
        .contains(&search_term.to_lowercase())
}

/// Compare two cameras for the given sort key
pub fn compare(a: &CameraRecord, b: &CameraRecord, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::Name => compare_names(&a.main_road, &b.main_road),
        // North (higher y) first
        SortKey::NorthSouth => coordinate(b.y).total_cmp(&coordinate(a.y)),
        SortKey::SouthNorth => coordinate(a.y).total_cmp(&coordinate(b.y)),
        // East (higher x) first
        SortKey::EastWest => coordinate(b.x).total_cmp(&coordinate(a.x)),
        SortKey::WestEast => coordinate(a.x).total_cmp(&coordinate(b.x)),
    }
}

/// Filter then sort. `sort` is stable, so equal keys keep catalog order.
pub fn apply(catalog: &[CameraRecord], search_term: &str, sort_key: SortKey) -> Vec<CameraRecord> {
    let mut visible = filtered(catalog, search_term);
    visible.sort_by(|a, b| compare(a, b, sort_key));
    visible
}

fn filtered(catalog: &[CameraRecord], search_term: &str) -> Vec<CameraRecord> {
    catalog
        .iter()
        .filter(|record| matches(record, search_term))
        .cloned()
        .collect()
}

/// Missing coordinates sort as 0
fn coordinate(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Root-locale collator shared by every name comparison
fn collator() -> Option<&'static CollatorBorrowed<'static>> {
    static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    COLLATOR
        .get_or_init(|| {
            match Collator::try_new(Default::default(), CollatorOptions::default()) {
                Ok(collator) => Some(collator),
                Err(err) => {
                    tracing::warn!("Collation data unavailable, sorting names by case-folded text: {}", err);
                    None
                }
            }
        })
        .as_ref()
}

/// Locale-aware road name order ("bay st" < "Bay St" < "École Rd" < "Eglinton Ave").
/// Ties fall back to the raw strings so the order stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    let collated = match collator() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    collated.then_with(|| a.cmp(b))
}

/// The visible list together with the inputs it was computed from.
/// Recomputes only when one of those inputs changed.
#[derive(Debug, Default)]
pub struct VisibleList {
    inputs: Option<(u64, String, SortKey)>,
    records: Vec<CameraRecord>,
}

impl VisibleList {
    /// Bring the list up to date. Returns true when it was recomputed.
    pub fn refresh(
        &mut self,
        catalog: &[CameraRecord],
        catalog_revision: u64,
        search_term: &str,
        sort_key: SortKey,
    ) -> bool {
        let unchanged = matches!(
            &self.inputs,
            Some((revision, term, key))
                if *revision == catalog_revision && term == search_term && *key == sort_key
        );
        if unchanged {
            return false;
        }

        self.records = apply(catalog, search_term, sort_key);
        self.inputs = Some((catalog_revision, search_term.to_string(), sort_key));
        true
    }

    pub fn records(&self) -> &[CameraRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Position of a camera in the list, by ID
    pub fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}
