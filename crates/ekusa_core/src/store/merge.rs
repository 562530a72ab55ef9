//! Seeded/overlay merge, natural-key upsert and soft delete.
//!
//! # Responsibility
//! - Combine an immutable seeded collection with a persisted overlay.
//! - Upsert incoming drafts into the overlay by a caller-chosen matcher.
//! - Track removal of seeded records in a separate identifier set.
//!
//! # Invariants
//! - Functions here never touch storage; callers persist the overlay and
//!   removed set they pass in.
//! - The seeded slice is never modified.
//! - Upsert searches the overlay only. A seeded record re-uploaded under
//!   the same natural key becomes a second overlay record.

use crate::model::{new_record_id, Record};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Overlay record that can be created from, or updated by, a draft.
pub trait OverlayRecord: Record + Clone {
    type Draft;

    fn create_from_draft(id: String, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;

    /// Merges draft fields into `self`, keeping identity and `created_at`.
    fn absorb(&mut self, draft: Self::Draft, updated_at: DateTime<Utc>);
}

/// Outcome of one upsert batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertReport<T> {
    /// Identifiers assigned to newly appended overlay records.
    pub inserted: Vec<String>,
    /// Identifiers of overlay records updated in place.
    pub updated: Vec<String>,
    /// Seeded + overlay after the batch, deduplicated by identifier.
    pub effective: Vec<T>,
}

/// Returns seeded ∪ overlay deduplicated by identifier, minus `removed`.
///
/// Overlay wins on identifier collision and takes the colliding seeded
/// record's position; new overlay identifiers are appended in order.
pub fn effective_view<T>(seeded: &[T], overlay: &[T], removed: &[String]) -> Vec<T>
where
    T: Record + Clone,
{
    let mut view: Vec<T> = Vec::with_capacity(seeded.len() + overlay.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in seeded.iter().chain(overlay) {
        match positions.get(record.record_id()) {
            Some(&index) => view[index] = record.clone(),
            None => {
                positions.insert(record.record_id(), view.len());
                view.push(record.clone());
            }
        }
    }

    if removed.is_empty() {
        return view;
    }
    let removed: HashSet<&str> = removed.iter().map(String::as_str).collect();
    view.retain(|record| !removed.contains(record.record_id()));
    view
}

/// Upserts `incoming` drafts into `overlay` by natural key.
///
/// For each draft, the first overlay record accepted by `matches` absorbs
/// the draft and is stamped with `now` as update time; otherwise a new
/// record with a fresh identifier and `now` as creation time is appended.
/// Drafts in one batch that share a natural key collapse into one record.
pub fn merge_and_upsert_by_natural_key<T, I, M>(
    seeded: &[T],
    overlay: &mut Vec<T>,
    incoming: I,
    now: DateTime<Utc>,
    matches: M,
) -> UpsertReport<T>
where
    T: OverlayRecord,
    I: IntoIterator<Item = T::Draft>,
    M: Fn(&T, &T::Draft) -> bool,
{
    let mut inserted = Vec::new();
    let mut updated = Vec::new();

    for draft in incoming {
        match overlay.iter().position(|record| matches(record, &draft)) {
            Some(index) => {
                let existing = &mut overlay[index];
                existing.absorb(draft, now);
                updated.push(existing.record_id().to_string());
            }
            None => {
                let record = T::create_from_draft(new_record_id(), draft, now);
                inserted.push(record.record_id().to_string());
                overlay.push(record);
            }
        }
    }

    UpsertReport {
        inserted,
        updated,
        effective: effective_view(seeded, overlay, &[]),
    }
}

/// What [`soft_delete`] did with an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record lived in the overlay and was physically removed.
    RemovedFromOverlay,
    /// The identifier was added to the removed set.
    MarkedRemoved,
    /// The identifier was already in the removed set.
    AlreadyMarked,
}

/// Removes `id` from the overlay, or records it in `removed` if absent there.
///
/// `removed` stays untouched when the overlay held the record.
pub fn soft_delete<T: Record>(
    overlay: &mut Vec<T>,
    removed: &mut Vec<String>,
    id: &str,
) -> DeleteOutcome {
    let before = overlay.len();
    overlay.retain(|record| record.record_id() != id);
    if overlay.len() != before {
        return DeleteOutcome::RemovedFromOverlay;
    }

    if removed.iter().any(|existing| existing == id) {
        return DeleteOutcome::AlreadyMarked;
    }
    removed.push(id.to_string());
    DeleteOutcome::MarkedRemoved
}
