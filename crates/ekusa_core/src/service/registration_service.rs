//! Event registrations for non-members.

use super::error::{writable, ServiceError, ServiceResult};
use super::event_service::EventService;
use super::views::{join_registrations, registration_counts, EventRegistrationCount, RegistrationView};
use crate::model::new_record_id;
use crate::model::registration::{EventRegistration, RegistrationDraft};
use crate::store::collection::remove_by_id;
use crate::store::{keys, KeyValueBackend, RecordStore};
use chrono::Utc;
use log::info;

pub struct RegistrationService<'s, B: KeyValueBackend> {
    store: &'s RecordStore<B>,
}

impl<'s, B: KeyValueBackend> RegistrationService<'s, B> {
    pub fn new(store: &'s RecordStore<B>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Vec<EventRegistration> {
        self.store.load(keys::EVENT_REGISTRATIONS, Vec::new())
    }

    fn load_for_write(&self) -> ServiceResult<Vec<EventRegistration>> {
        writable(
            self.store.load_checked(keys::EVENT_REGISTRATIONS, Vec::new()),
            keys::EVENT_REGISTRATIONS,
        )
    }

    /// Records a registration. The event reference is not checked.
    pub fn register(
        &self,
        event_id: &str,
        draft: RegistrationDraft,
    ) -> ServiceResult<EventRegistration> {
        draft.validate()?;
        let mut registrations = self.load_for_write()?;
        let registration =
            EventRegistration::from_draft(new_record_id(), event_id, draft, Utc::now());
        registrations.push(registration.clone());
        self.store.save(keys::EVENT_REGISTRATIONS, &registrations);
        info!(
            "event=registration_create module=service status=ok id={} event_id={event_id}",
            registration.id
        );
        Ok(registration)
    }

    /// Registrations joined with their events, newest first.
    pub fn list(&self) -> Vec<RegistrationView> {
        let events = EventService::new(self.store).load_all();
        join_registrations(&self.load_all(), &events)
    }

    /// Registrations whose resolved event has `event_id`.
    ///
    /// Passing `EventRef::UNKNOWN_ID` selects registrations with dangling
    /// event references.
    pub fn list_for_event(&self, event_id: &str) -> Vec<RegistrationView> {
        self.list()
            .into_iter()
            .filter(|view| view.event.id == event_id)
            .collect()
    }

    /// Registration count for every event, latest event first.
    pub fn counts(&self) -> Vec<EventRegistrationCount> {
        let events = EventService::new(self.store).list();
        registration_counts(&events, &self.load_all())
    }

    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let mut registrations = self.load_for_write()?;
        if !remove_by_id(&mut registrations, id) {
            return Err(ServiceError::not_found(keys::EVENT_REGISTRATIONS, id));
        }
        self.store.save(keys::EVENT_REGISTRATIONS, &registrations);
        info!("event=registration_delete module=service status=ok id={id}");
        Ok(())
    }
}
