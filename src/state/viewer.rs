/// Full-screen viewer navigation
///
/// The viewer is either closed or open on one camera ID. Next/previous
/// look the ID up in the current visible list every time, so the selection
/// follows the camera through re-sorts and filter changes.
///
/// If the selected camera has been filtered out while the viewer is open,
/// next/previous do nothing and the viewer stays on that camera.

use super::filter::VisibleList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Closed,
    Open(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Prev,
}

impl Viewer {
    pub fn open(&mut self, id: i64) {
        *self = Viewer::Open(id);
    }

    pub fn close(&mut self) {
        *self = Viewer::Closed;
    }

    pub fn selected(&self) -> Option<i64> {
        match self {
            Viewer::Open(id) => Some(*id),
            Viewer::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Viewer::Open(_))
    }

    /// Key bindings are live exactly while the viewer is open
    pub fn wants_keyboard(&self) -> bool {
        self.is_open()
    }

    /// Move the selection one step through `visible`, wrapping at both ends.
    /// Returns true if the selection changed.
    fn step(&mut self, visible: &VisibleList, step: Step) -> bool {
        let Viewer::Open(id) = *self else {
            return false;
        };
        let len = visible.len();
        if len == 0 {
            return false;
        }
        let Some(pos) = visible.position(id) else {
            tracing::debug!("Camera {} is not in the visible list; staying put", id);
            return false;
        };

        let target = match step {
            Step::Next => (pos + 1) % len,
            Step::Prev => (pos + len - 1) % len,
        };
        let next_id = visible.records()[target].id;
        *self = Viewer::Open(next_id);
        next_id != id
    }

    pub fn next(&mut self, visible: &VisibleList) -> bool {
        self.step(visible, Step::Next)
    }

    pub fn prev(&mut self, visible: &VisibleList) -> bool {
        self.step(visible, Step::Prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{CameraRecord, SortKey};

    fn camera(id: i64, main: &str) -> CameraRecord {
        CameraRecord {
            id,
            image_url: format!("http://cams/{}.jpg", id),
            main_road: main.to_string(),
            cross_road: None,
            direction: None,
            x: None,
            y: Some(id as f64),
        }
    }

    fn visible(records: &[CameraRecord], term: &str, key: SortKey) -> VisibleList {
        let mut list = VisibleList::default();
        list.refresh(records, 1, term, key);
        list
    }

    fn catalog() -> Vec<CameraRecord> {
        vec![
            camera(10, "Adelaide St"),
            camera(20, "Bay St"),
            camera(30, "College St"),
            camera(40, "Dundas St"),
        ]
    }

    #[test]
    fn test_open_and_close() {
        let mut viewer = Viewer::default();
        assert!(!viewer.is_open());
        assert!(!viewer.wants_keyboard());

        viewer.open(20);
        assert_eq!(viewer.selected(), Some(20));
        assert!(viewer.wants_keyboard());

        // Opening another camera replaces the selection
        viewer.open(30);
        assert_eq!(viewer.selected(), Some(30));

        viewer.close();
        assert_eq!(viewer, Viewer::Closed);
        assert!(!viewer.wants_keyboard());
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let list = visible(&catalog(), "", SortKey::Name);
        let mut viewer = Viewer::Open(40);

        assert!(viewer.next(&list));
        assert_eq!(viewer.selected(), Some(10));
        assert!(viewer.prev(&list));
        assert_eq!(viewer.selected(), Some(40));
        assert!(viewer.prev(&list));
        assert_eq!(viewer.selected(), Some(30));
    }

    #[test]
    fn test_n_steps_return_to_start() {
        let list = visible(&catalog(), "", SortKey::Name);
        for start in [10, 20, 30, 40] {
            let mut viewer = Viewer::Open(start);
            for _ in 0..list.len() {
                viewer.next(&list);
            }
            assert_eq!(viewer.selected(), Some(start));

            for _ in 0..list.len() {
                viewer.prev(&list);
            }
            assert_eq!(viewer.selected(), Some(start));
        }
    }

    #[test]
    fn test_navigation_follows_current_sort() {
        let mut viewer = Viewer::Open(20);
        let by_name = visible(&catalog(), "", SortKey::Name);
        viewer.next(&by_name);
        assert_eq!(viewer.selected(), Some(30));

        // Re-sorted while open: position is found again by ID
        let north_first = visible(&catalog(), "", SortKey::NorthSouth);
        viewer.next(&north_first);
        assert_eq!(viewer.selected(), Some(20));
    }

    #[test]
    fn test_single_camera_wraps_to_itself() {
        let list = visible(&catalog(), "college", SortKey::Name);
        let mut viewer = Viewer::Open(30);
        assert!(!viewer.next(&list));
        assert_eq!(viewer.selected(), Some(30));
        assert!(!viewer.prev(&list));
        assert_eq!(viewer.selected(), Some(30));
    }

    #[test]
    fn test_empty_list_is_a_no_op() {
        let list = visible(&catalog(), "no such road", SortKey::Name);
        let mut viewer = Viewer::Open(10);
        assert!(!viewer.next(&list));
        assert!(!viewer.prev(&list));
        assert_eq!(viewer, Viewer::Open(10));
    }

    #[test]
    fn test_filtered_out_selection_stays_put() {
        let list = visible(&catalog(), "bay", SortKey::Name);
        let mut viewer = Viewer::Open(40);
        assert!(!viewer.next(&list));
        assert!(!viewer.prev(&list));
        assert_eq!(viewer, Viewer::Open(40));
    }

    #[test]
    fn test_closed_viewer_ignores_navigation() {
        let list = visible(&catalog(), "", SortKey::Name);
        let mut viewer = Viewer::Closed;
        assert!(!viewer.next(&list));
        assert!(!viewer.prev(&list));
        assert_eq!(viewer, Viewer::Closed);
    }
}
