//! Typed records for every persisted collection.
//!
//! # Responsibility
//! - Define canonical shapes for members, events, news, contact messages,
//!   registrations and interests.
//! - Make optional fields explicit instead of null-or-missing ambiguity.
//!
//! # Invariants
//! - Every identified record exposes a stable opaque `id` via [`Record`].
//! - Stored JSON field names stay compatible with the site's namespace.

use chrono::{DateTime, Utc};

pub mod contact;
pub mod event;
pub mod member;
pub mod news;
pub mod registration;
pub mod validation;

/// Record with a unique opaque identifier inside its collection.
pub trait Record {
    fn record_id(&self) -> &str;
}

/// Generates a fresh opaque record identifier.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Sorts records newest first by an optional timestamp.
///
/// Records without a timestamp sort last; ties keep their input order.
pub fn sort_newest_first<T, F>(items: &mut [T], timestamp: F)
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    items.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
}

pub(crate) fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
