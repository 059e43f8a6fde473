use crate::note::NoteId;
use std::collections::HashSet;

/// Result of flipping one note's membership in the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
    /// The last selected note was deselected; selection mode should end.
    Emptied,
}

impl SelectionChange {
    pub fn ends_selection(self) -> bool {
        matches!(self, SelectionChange::Emptied)
    }
}

/// Notes marked for batch deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<NoteId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: NoteId) -> SelectionChange {
        if self.ids.remove(&id) {
            if self.ids.is_empty() {
                SelectionChange::Emptied
            } else {
                SelectionChange::Deselected
            }
        } else {
            self.ids.insert(id);
            SelectionChange::Selected
        }
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &HashSet<NoteId> {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&NoteId) -> bool) {
        self.ids.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_toggle_reports_membership() {
        let mut set = SelectionSet::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(set.toggle(a), SelectionChange::Selected);
        assert_eq!(set.toggle(b), SelectionChange::Selected);
        assert_eq!(set.toggle(a), SelectionChange::Deselected);
        assert!(set.contains(b));
        assert_eq!(set.toggle(b), SelectionChange::Emptied);
        assert!(set.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut set = SelectionSet::new();
        let keep = Uuid::new_v4();
        let other = Uuid::new_v4();
        set.toggle(keep);
        let before = set.clone();

        set.toggle(other);
        set.toggle(other);
        assert_eq!(set, before);

        set.toggle(keep);
        set.toggle(keep);
        assert_eq!(set, before);
    }

    #[test]
    fn test_change_helpers() {
        assert!(!SelectionChange::Selected.ends_selection());
        assert!(SelectionChange::Emptied.ends_selection());
        assert!(!SelectionChange::Deselected.ends_selection());
    }
}
