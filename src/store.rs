use crate::note::{self, Note, NoteId, cmp_recency, now_minute};
use crate::selection::{SelectionChange, SelectionSet};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod errors;

pub use errors::StoreError;

/// Store file used when no path is configured, relative to the working
/// directory.
pub const DEFAULT_STORE_FILE: &str = "notes_data.json";

#[derive(Serialize)]
struct StoreFileOut<'a> {
    notes: Vec<StoredNoteOut<'a>>,
}

#[derive(Serialize)]
struct StoredNoteOut<'a> {
    id: NoteId,
    title: &'a str,
    content: &'a str,
    #[serde(with = "note::date_format")]
    date: NaiveDateTime,
}

impl<'a> From<&'a Note> for StoredNoteOut<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: note.id,
            title: &note.title,
            content: &note.content,
            date: note.timestamp,
        }
    }
}

#[derive(Deserialize, Default)]
struct StoreFileIn {
    #[serde(default)]
    notes: Vec<StoredNoteIn>,
}

// Files written before ids existed carry only title/content/date.
#[derive(Deserialize)]
struct StoredNoteIn {
    #[serde(default)]
    id: Option<NoteId>,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(with = "note::date_format")]
    date: NaiveDateTime,
}

/// Read every note from `path` in stored order. A missing file is an empty
/// collection; unreadable or malformed files are errors.
pub fn read_notes(path: &Path) -> Result<Vec<Note>, StoreError> {
    read_store(path).map(|(notes, _)| notes)
}

/// Overwrite `path` with the whole collection.
pub fn write_notes(path: &Path, notes: &[Note]) -> Result<(), StoreError> {
    let file = StoreFileOut {
        notes: notes.iter().map(StoredNoteOut::from).collect(),
    };
    let mut json =
        serde_json::to_string_pretty(&file).map_err(StoreError::Encode)?;
    json.push('\n');

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) =
        path.parent().filter(|p| !p.as_os_str().is_empty())
    {
        ensure_dir(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)
}

fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Returns the notes plus how many of them needed a fresh id.
fn read_store(path: &Path) -> Result<(Vec<Note>, usize), StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok((Vec::new(), 0));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    decode(&raw).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(raw: &str) -> Result<(Vec<Note>, usize), serde_json::Error> {
    let file: StoreFileIn = serde_json::from_str(raw)?;
    let mut seen: HashSet<NoteId> = HashSet::new();
    let mut assigned = 0;
    let mut notes = Vec::with_capacity(file.notes.len());
    for stored in file.notes {
        let id = match stored.id {
            Some(id) if seen.insert(id) => id,
            _ => {
                assigned += 1;
                let id = Uuid::new_v4();
                seen.insert(id);
                id
            }
        };
        notes.push(Note::with_id(
            id,
            stored.title,
            stored.content,
            stored.date,
        ));
    }
    Ok((notes, assigned))
}

/// The authoritative note collection: identity, ordering, selection and
/// persistence. Every mutation goes through here; callers persist with
/// [`NoteStore::save`].
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
    selection: SelectionSet,
}

impl NoteStore {
    /// Load the collection at `path`. Any read failure yields an empty
    /// collection so startup never fails on a bad store file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_store(&path) {
            Ok((notes, assigned)) => {
                debug!(
                    "loaded {} note(s) from {}",
                    notes.len(),
                    path.display()
                );
                let store = Self::with_notes(path, notes);
                if assigned > 0 {
                    info!("assigned ids to {assigned} stored note(s)");
                    if let Err(err) = store.save() {
                        warn!("{err}");
                    }
                }
                store
            }
            Err(err) => {
                warn!("{err}; starting with an empty collection");
                Self::with_notes(path, Vec::new())
            }
        }
    }

    pub fn with_notes(path: impl Into<PathBuf>, notes: Vec<Note>) -> Self {
        Self { path: path.into(), notes, selection: SelectionSet::new() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All notes, newest first.
    pub fn notes(&self) -> Vec<&Note> {
        let mut ordered: Vec<&Note> = self.notes.iter().collect();
        ordered.sort_by(|a, b| cmp_recency(a, b));
        ordered
    }

    /// Notes in stored (insertion) order, as written to disk.
    pub fn stored(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Resolve a full id or a unique prefix of one.
    pub fn resolve_id(&self, needle: &str) -> Result<NoteId, StoreError> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(StoreError::UnknownId(needle));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            if self.get(id).is_some() {
                return Ok(id);
            }
        }
        let mut matches = self.notes.iter().filter(|n| {
            n.id.hyphenated().to_string().starts_with(&needle)
                || n.id.simple().to_string().starts_with(&needle)
        });
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note.id),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousId(needle)),
            (None, _) => Err(StoreError::UnknownId(needle)),
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_notes(&self.path, &self.notes)?;
        debug!(
            "saved {} note(s) to {}",
            self.notes.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn create(
        &mut self,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        self.create_at(title, content, now_minute())
    }

    /// Append a note stamped with `timestamp`. Title and content are stored
    /// trimmed; a blank title leaves the collection untouched.
    pub fn create_at(
        &mut self,
        title: &str,
        content: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Note, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let note = Note::new(title, content.trim(), timestamp);
        debug!("created note {}", note.id);
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Overwrite title and content of the note with `id` in place. Position
    /// and timestamp are kept.
    pub fn update(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        note.title = title.to_string();
        note.content = content.trim().to_string();
        debug!("updated note {id}");
        Ok(note.clone())
    }

    /// Remove every listed note that is still present. Returns how many were
    /// removed; ids already gone are skipped.
    pub fn delete_many(&mut self, ids: &HashSet<NoteId>) -> usize {
        let before = self.notes.len();
        self.notes.retain(|n| !ids.contains(&n.id));
        self.selection.retain(|id| !ids.contains(id));
        let removed = before - self.notes.len();
        debug!("deleted {removed} of {} requested note(s)", ids.len());
        removed
    }

    pub fn toggle_selection(
        &mut self,
        id: NoteId,
    ) -> Result<SelectionChange, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        Ok(self.selection.toggle(id))
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: NoteId) -> bool {
        self.selection.contains(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
