//! View-state machine driving the store from presentation commands.

use crate::gesture::{Gesture, classify_gesture};
use crate::note::{Note, NoteId};
use crate::selection::SelectionChange;
use crate::store::{NoteStore, StoreError};
use log::{debug, error, warn};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Listing,
    /// Editor open; `None` means a new note.
    Editing(Option<NoteId>),
    SelectingForDelete,
}

/// What a press on a card did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Opened(NoteId),
    Selection(SelectionChange),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Note),
    /// Blank title; the editor stays open.
    Rejected,
    /// The bound note no longer exists; nothing was written.
    Missing(NoteId),
    NotEditing,
}

/// Owns the store and the current view. All presentation input goes through
/// these methods; the presentation re-renders from [`Session::store`].
#[derive(Debug)]
pub struct Session {
    store: NoteStore,
    state: ViewState,
    notices: Vec<String>,
}

impl Session {
    pub fn new(store: NoteStore) -> Self {
        Self { store, state: ViewState::Listing, notices: Vec::new() }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Open the editor for a new note.
    pub fn begin_create(&mut self) -> bool {
        if self.state != ViewState::Listing {
            return false;
        }
        self.state = ViewState::Editing(None);
        true
    }

    /// Open the editor bound to an existing note. Refused while selecting.
    pub fn open_note(&mut self, id: NoteId) -> bool {
        if self.state != ViewState::Listing || self.store.get(id).is_none() {
            return false;
        }
        self.state = ViewState::Editing(Some(id));
        true
    }

    /// Title and content the editor starts with, or `None` outside the
    /// editor.
    pub fn editor_draft(&self) -> Option<(String, String)> {
        match self.state {
            ViewState::Editing(None) => Some((String::new(), String::new())),
            ViewState::Editing(Some(id)) => self
                .store
                .get(id)
                .map(|n| (n.title().to_string(), n.content().to_string())),
            _ => None,
        }
    }

    /// Dispatch a raw touch on a card.
    pub fn press(
        &mut self,
        id: NoteId,
        down: Instant,
        up: Instant,
    ) -> PressOutcome {
        match classify_gesture(down, up) {
            Gesture::Tap => self.tap(id),
            Gesture::LongPress => self.long_press(id),
        }
    }

    pub fn tap(&mut self, id: NoteId) -> PressOutcome {
        match self.state {
            ViewState::Listing => {
                if self.open_note(id) {
                    PressOutcome::Opened(id)
                } else {
                    PressOutcome::Ignored
                }
            }
            ViewState::SelectingForDelete => self.toggle(id),
            ViewState::Editing(_) => PressOutcome::Ignored,
        }
    }

    /// Enters selection mode from the list and toggles the pressed card.
    pub fn long_press(&mut self, id: NoteId) -> PressOutcome {
        match self.state {
            ViewState::Listing | ViewState::SelectingForDelete => {
                self.toggle(id)
            }
            ViewState::Editing(_) => PressOutcome::Ignored,
        }
    }

    fn toggle(&mut self, id: NoteId) -> PressOutcome {
        match self.store.toggle_selection(id) {
            Ok(change) => {
                self.state = if change.ends_selection() {
                    ViewState::Listing
                } else {
                    ViewState::SelectingForDelete
                };
                debug!("selection {change:?} for {id}");
                PressOutcome::Selection(change)
            }
            Err(err) => {
                warn!("{err}");
                PressOutcome::Ignored
            }
        }
    }

    /// Leave the editor without saving.
    pub fn back(&mut self) -> bool {
        if !matches!(self.state, ViewState::Editing(_)) {
            return false;
        }
        self.state = ViewState::Listing;
        true
    }

    /// Save the editor fields into the bound note (or a new one) and return
    /// to the list. A blank title keeps the editor open.
    pub fn save(&mut self, title: &str, content: &str) -> SaveOutcome {
        let ViewState::Editing(bound) = self.state else {
            return SaveOutcome::NotEditing;
        };
        let result = match bound {
            None => self.store.create(title, content),
            Some(id) => self.store.update(id, title, content),
        };
        match result {
            Ok(note) => {
                self.state = ViewState::Listing;
                self.persist();
                SaveOutcome::Saved(note)
            }
            Err(StoreError::EmptyTitle) => SaveOutcome::Rejected,
            Err(StoreError::NotFound(id)) => {
                warn!("note {id} disappeared while editing");
                self.state = ViewState::Listing;
                SaveOutcome::Missing(id)
            }
            Err(err) => {
                // create/update only fail with the variants above
                error!("{err}");
                SaveOutcome::Rejected
            }
        }
    }

    /// Delete everything selected and return to the list. Returns how many
    /// notes were removed.
    pub fn confirm_delete(&mut self) -> usize {
        if self.state != ViewState::SelectingForDelete {
            return 0;
        }
        let targets = self.store.selection().ids().clone();
        let removed = self.store.delete_many(&targets);
        self.store.clear_selection();
        self.state = ViewState::Listing;
        self.persist();
        removed
    }

    /// Pending non-blocking messages for the user, oldest first.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save() {
            error!("{err}");
            self.notices.push(format!("Could not save notes: {err}"));
        }
    }
}
