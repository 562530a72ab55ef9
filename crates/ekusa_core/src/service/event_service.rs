//! Event use-cases for the public calendar and the admin manager.

use super::error::{writable, ServiceError, ServiceResult};
use crate::model::event::{Event, EventDraft};
use crate::model::new_record_id;
use crate::seed::initial_events;
use crate::store::collection::{find_by_id, remove_by_id, update_by_id};
use crate::store::{keys, KeyValueBackend, RecordStore};
use chrono::Utc;
use log::info;

/// Events page split on the past/upcoming flag, each latest date first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventSchedule {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

pub struct EventService<'s, B: KeyValueBackend> {
    store: &'s RecordStore<B>,
}

impl<'s, B: KeyValueBackend> EventService<'s, B> {
    pub fn new(store: &'s RecordStore<B>) -> Self {
        Self { store }
    }

    pub(crate) fn load_all(&self) -> Vec<Event> {
        self.store.load(keys::EVENTS, initial_events())
    }

    fn load_for_write(&self) -> ServiceResult<Vec<Event>> {
        writable(self.store.load_checked(keys::EVENTS, initial_events()), keys::EVENTS)
    }

    /// All events, latest `event_date` first.
    pub fn list(&self) -> Vec<Event> {
        let mut events = self.load_all();
        events.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        events
    }

    pub fn schedule(&self) -> EventSchedule {
        let (past, upcoming) = self.list().into_iter().partition(|event| event.is_past);
        EventSchedule { upcoming, past }
    }

    pub fn get(&self, id: &str) -> Option<Event> {
        find_by_id(&self.load_all(), id).cloned()
    }

    pub fn create(&self, draft: EventDraft) -> ServiceResult<Event> {
        draft.validate()?;
        let mut events = self.load_for_write()?;
        let event = Event::from_draft(new_record_id(), draft, Utc::now());
        events.push(event.clone());
        self.store.save(keys::EVENTS, &events);
        info!("event=event_create module=service status=ok id={}", event.id);
        Ok(event)
    }

    pub fn update(&self, id: &str, draft: EventDraft) -> ServiceResult<Event> {
        draft.validate()?;
        let mut events = self.load_for_write()?;
        let mut updated = None;
        update_by_id(&mut events, id, |event| {
            event.apply_draft(draft);
            updated = Some(event.clone());
        });
        let Some(updated) = updated else {
            return Err(ServiceError::not_found(keys::EVENTS, id));
        };
        self.store.save(keys::EVENTS, &events);
        info!("event=event_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Deletes an event. Registrations and interests pointing at it are kept
    /// and resolve to the unknown-event placeholder afterwards.
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut events = self.load_for_write()?;
        if !remove_by_id(&mut events, id) {
            return Err(ServiceError::not_found(keys::EVENTS, id));
        }
        self.store.save(keys::EVENTS, &events);
        info!("event=event_delete module=service status=ok id={id}");
        Ok(())
    }
}
