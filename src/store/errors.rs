use crate::note::NoteId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("note title cannot be empty")]
    EmptyTitle,

    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error("no note matches id `{0}`")]
    UnknownId(String),

    #[error("id `{0}` matches more than one note")]
    AmbiguousId(String),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode notes: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
