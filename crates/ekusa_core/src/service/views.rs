//! Read-time joins producing denormalized views.
//!
//! # Invariants
//! - Views are computed on read and never persisted.
//! - Dangling references resolve to placeholders instead of failing.

use crate::model::event::{Event, EventCategory};
use crate::model::member::Member;
use crate::model::registration::{EventInterest, EventRegistration};
use crate::model::{sort_newest_first, Record};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Event fields shown next to a registration or interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRef {
    pub id: String,
    pub title: String,
    pub event_date: Option<NaiveDate>,
    pub category: EventCategory,
}

impl EventRef {
    pub const UNKNOWN_ID: &'static str = "unknown";

    /// Placeholder for a reference to a deleted or never-existing event.
    pub fn unknown() -> Self {
        Self {
            id: Self::UNKNOWN_ID.to_string(),
            title: "Unknown Event".to_string(),
            event_date: None,
            category: EventCategory::Other("Unknown".to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.id == Self::UNKNOWN_ID
    }
}

impl From<&Event> for EventRef {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            event_date: Some(event.event_date),
            category: event.category.clone(),
        }
    }
}

/// Member fields shown next to an interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// `None` when the referenced member no longer exists.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub registration_number: String,
}

impl MemberRef {
    pub fn unknown() -> Self {
        Self {
            id: None,
            name: "Unknown".to_string(),
            email: String::new(),
            registration_number: String::new(),
        }
    }
}

impl From<&Member> for MemberRef {
    fn from(member: &Member) -> Self {
        Self {
            id: Some(member.id.clone()),
            name: member.name.clone(),
            email: member.email.clone().unwrap_or_default(),
            registration_number: member.registration_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationView {
    pub registration: EventRegistration,
    pub event: EventRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestView {
    pub interest: EventInterest,
    pub member: MemberRef,
    pub event: EventRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRegistrationCount {
    pub event: EventRef,
    pub registrations: usize,
}

fn index_by_id<T: Record>(items: &[T]) -> HashMap<&str, &T> {
    items.iter().map(|item| (item.record_id(), item)).collect()
}

/// Joins registrations with their events, newest registration first.
pub fn join_registrations(
    registrations: &[EventRegistration],
    events: &[Event],
) -> Vec<RegistrationView> {
    let events_by_id = index_by_id(events);
    let mut views: Vec<RegistrationView> = registrations
        .iter()
        .map(|registration| RegistrationView {
            registration: registration.clone(),
            event: events_by_id
                .get(registration.event_id.as_str())
                .map_or_else(EventRef::unknown, |event| EventRef::from(*event)),
        })
        .collect();
    sort_newest_first(&mut views, |view| Some(view.registration.created_at));
    views
}

/// Joins interests with their members and events, in stored order.
pub fn join_interests(
    interests: &[EventInterest],
    members: &[Member],
    events: &[Event],
) -> Vec<InterestView> {
    let members_by_id = index_by_id(members);
    let events_by_id = index_by_id(events);
    interests
        .iter()
        .map(|interest| InterestView {
            interest: interest.clone(),
            member: members_by_id
                .get(interest.member_id.as_str())
                .map_or_else(MemberRef::unknown, |member| MemberRef::from(*member)),
            event: events_by_id
                .get(interest.event_id.as_str())
                .map_or_else(EventRef::unknown, |event| EventRef::from(*event)),
        })
        .collect()
}

/// Counts registrations per known event, in the given event order.
///
/// Registrations pointing at unknown events are not counted.
pub fn registration_counts(
    events: &[Event],
    registrations: &[EventRegistration],
) -> Vec<EventRegistrationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for registration in registrations {
        *counts.entry(registration.event_id.as_str()).or_default() += 1;
    }
    events
        .iter()
        .map(|event| EventRegistrationCount {
            event: EventRef::from(event),
            registrations: counts.get(event.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}
