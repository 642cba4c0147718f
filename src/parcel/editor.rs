//! Interactive editing state kept apart from the polygon data
//!
//! A presentation layer (map widget, terminal UI) owns the live vertex paths
//! while the user drags handles. It exposes them through [`RingSource`];
//! [`EditSession`] tracks selection and edit mode and pushes committed edits
//! into the [`PolygonSet`].

use super::PolygonSet;
use crate::domain::{GeoPoint, Polygon};
use crate::error::Result;
use crate::geometry::{BoundingBox, bounding_box};

/// Live vertex paths of the rings being displayed, by set index
pub trait RingSource {
    fn current_path(&self, index: usize) -> Option<Vec<GeoPoint>>;
}

impl RingSource for PolygonSet {
    fn current_path(&self, index: usize) -> Option<Vec<GeoPoint>> {
        self.get(index).map(|p| p.vertices().to_vec())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    selected: Option<usize>,
    editing: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Select a polygon, returning the bounds the view should fit
    pub fn select(&mut self, set: &PolygonSet, index: usize) -> Result<BoundingBox> {
        let polygon = set.try_get(index)?;
        self.selected = Some(index);
        Ok(bounding_box(polygon))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Enter or leave edit mode; returns whether edit mode is now on
    ///
    /// Leaving edit mode commits the selected ring's live path from `source`.
    /// If the live path is not a valid ring the set is left untouched and the
    /// session stays in edit mode.
    pub fn toggle_edit<S: RingSource + ?Sized>(
        &mut self,
        set: &mut PolygonSet,
        source: &S,
    ) -> Result<bool> {
        if self.editing {
            self.commit(set, source)?;
        }
        self.editing = !self.editing;
        Ok(self.editing)
    }

    fn commit<S: RingSource + ?Sized>(&self, set: &mut PolygonSet, source: &S) -> Result<()> {
        let Some(index) = self.selected else {
            return Ok(());
        };
        let Some(path) = source.current_path(index) else {
            log::debug!("no live path for polygon {}, nothing to commit", index);
            return Ok(());
        };
        let edited = Polygon::new(path)?;
        set.replace_vertex_path(index, edited)?;
        log::debug!("committed edited path for polygon {}", index);
        Ok(())
    }

    /// Remove the selected polygon and clear the selection
    ///
    /// Returns `None` when nothing is selected. Later polygons shift down one
    /// index.
    pub fn delete_selected(&mut self, set: &mut PolygonSet) -> Result<Option<Polygon>> {
        let Some(index) = self.selected else {
            return Ok(None);
        };
        let removed = set.remove_at(index)?;
        self.selected = None;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use std::collections::HashMap;

    struct Widget {
        paths: HashMap<usize, Vec<GeoPoint>>,
    }

    impl RingSource for Widget {
        fn current_path(&self, index: usize) -> Option<Vec<GeoPoint>> {
            self.paths.get(&index).cloned()
        }
    }

    fn square(offset: f64) -> Polygon {
        Polygon::new(vec![
            GeoPoint::new(offset, offset),
            GeoPoint::new(offset, offset + 1.0),
            GeoPoint::new(offset + 1.0, offset + 1.0),
            GeoPoint::new(offset + 1.0, offset),
        ])
        .unwrap()
    }

    fn parcel() -> PolygonSet {
        PolygonSet::from(vec![square(0.0), square(5.0), square(10.0)])
    }

    #[test]
    fn test_select_returns_bounds() {
        let set = parcel();
        let mut session = EditSession::new();
        let bounds = session.select(&set, 1).unwrap();
        assert_eq!(session.selected(), Some(1));
        assert_eq!(bounds.min_lat, 5.0);
        assert_eq!(bounds.max_lng, 6.0);

        assert!(matches!(
            session.select(&set, 3),
            Err(GridError::IndexOutOfRange { .. })
        ));
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_leaving_edit_commits_drag() {
        let mut set = parcel();
        let mut session = EditSession::new();
        session.select(&set, 1).unwrap();

        let dragged = square(7.0).into_vertices();
        let widget = Widget {
            paths: HashMap::from([(1, dragged.clone())]),
        };

        assert!(session.toggle_edit(&mut set, &widget).unwrap());
        assert_eq!(set.get(1), Some(&square(5.0)));

        assert!(!session.toggle_edit(&mut set, &widget).unwrap());
        assert_eq!(set.get(1).unwrap().vertices(), dragged.as_slice());
        assert_eq!(set.get(0), Some(&square(0.0)));
    }

    #[test]
    fn test_invalid_drag_keeps_edit_mode() {
        let mut set = parcel();
        let mut session = EditSession::new();
        session.select(&set, 0).unwrap();
        let widget = Widget {
            paths: HashMap::from([(0, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)])]),
        };

        session.toggle_edit(&mut set, &widget).unwrap();
        let err = session.toggle_edit(&mut set, &widget).unwrap_err();
        assert!(matches!(err, GridError::InvalidPolygon { .. }));
        assert!(session.is_editing());
        assert_eq!(set, parcel());
    }

    #[test]
    fn test_set_as_source_is_noop_commit() {
        let mut set = parcel();
        let source = set.clone();
        let mut session = EditSession::new();
        session.select(&set, 2).unwrap();
        session.toggle_edit(&mut set, &source).unwrap();
        session.toggle_edit(&mut set, &source).unwrap();
        assert_eq!(set, parcel());
    }

    #[test]
    fn test_delete_selected_reindexes() {
        let mut set = parcel();
        let mut session = EditSession::new();
        assert_eq!(session.delete_selected(&mut set).unwrap(), None);

        session.select(&set, 1).unwrap();
        let removed = session.delete_selected(&mut set).unwrap();
        assert_eq!(removed, Some(square(5.0)));
        assert_eq!(session.selected(), None);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1), Some(&square(10.0)));
    }
}
