//! Local record store over a single key-value namespace.
//!
//! # Responsibility
//! - Read and write whole JSON collections under named keys.
//! - Provide merge/upsert and soft-delete semantics for seeded collections.
//!
//! # Invariants
//! - Storage and decode failures never reach callers as errors; they get a
//!   usable value (the stored one or the supplied default), tagged with its
//!   source by the `*_checked` reads.
//! - Writes replace the whole collection; there is no partial update.
//! - Seeded collections are never rewritten by merge operations.

pub mod backend;
pub mod collection;
pub mod keys;
pub mod merge;
mod record_store;

pub use backend::{KeyValueBackend, MemoryBackend, SqliteBackend, StoreError, StoreResult};
pub use merge::{
    effective_view, merge_and_upsert_by_natural_key, soft_delete, DeleteOutcome, OverlayRecord,
    UpsertReport,
};
pub use record_store::{LoadSource, Loaded, RecordStore};
