//! Checked-row selection for list views.
//!
//! Selection is scoped to the visible rows: `toggle_all` only ever selects
//! ids the caller passes as visible, and `retain_visible` drops ids hidden by
//! a filter change.

use std::collections::BTreeSet;

/// A set of selected ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Ord> {
    ids: BTreeSet<Id>,
}

impl<Id: Ord> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select-all checkbox over the visible rows.
    ///
    /// When every visible id is already selected the selection is cleared,
    /// otherwise it becomes exactly the visible set. Applying it twice to an
    /// unchanged visible set returns to an empty or fully selected state.
    pub fn toggle_all<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let visible: BTreeSet<Id> = visible.into_iter().cloned().collect();
        if !visible.is_empty() && self.ids == visible {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    /// Whether every visible id is selected (drives the header checkbox).
    pub fn all_selected<'a, I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let mut any = false;
        for id in visible {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Drop ids that are no longer visible.
    pub fn retain_visible<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let visible: BTreeSet<&Id> = visible.into_iter().collect();
        self.ids.retain(|id| visible.contains(id));
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }

    /// Selected ids in order, e.g. to hand to a batch operation.
    pub fn to_vec(&self) -> Vec<Id> {
        self.ids.iter().cloned().collect()
    }
}

impl<Id: Ord> FromIterator<Id> for Selection<Id> {
    fn from_iter<T: IntoIterator<Item = Id>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(selection.is_selected(&"a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_excludes_hidden_rows() {
        let mut selection: Selection<&str> = Selection::new();
        let visible = ["a", "c"];
        selection.toggle_all(&visible);
        assert_eq!(selection.to_vec(), vec!["a", "c"]);
        assert!(!selection.is_selected(&"b"));
        assert!(selection.all_selected(&visible));
    }

    #[test]
    fn select_all_twice_clears() {
        let mut selection: Selection<&str> = Selection::new();
        let visible = ["a", "b"];
        selection.toggle_all(&visible);
        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn partial_selection_becomes_full() {
        let mut selection: Selection<&str> = ["a"].into_iter().collect();
        selection.toggle_all(&["a", "b"]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn retain_visible_drops_filtered_ids() {
        let mut selection: Selection<&str> = ["a", "b", "c"].into_iter().collect();
        selection.retain_visible(&["b"]);
        assert_eq!(selection.to_vec(), vec!["b"]);
    }

    #[test]
    fn empty_visible_set_is_never_all_selected() {
        let selection: Selection<&str> = Selection::new();
        assert!(!selection.all_selected(&[]));
    }
}
