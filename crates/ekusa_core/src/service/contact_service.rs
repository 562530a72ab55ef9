//! Contact form submissions and admin triage.

use super::error::{writable, ServiceError, ServiceResult};
use crate::model::contact::{ContactDraft, ContactMessage, ContactStatus};
use crate::model::{new_record_id, sort_newest_first};
use crate::store::collection::update_by_id;
use crate::store::{keys, KeyValueBackend, RecordStore};
use chrono::Utc;
use log::info;

/// Admin list filter. Empty search and `None` status match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search: String,
    pub status: Option<ContactStatus>,
}

impl ContactFilter {
    pub fn matches(&self, message: &ContactMessage) -> bool {
        let status_ok = self.status.map_or(true, |status| message.status == status);
        status_ok && message.matches_search(&self.search)
    }
}

pub struct ContactService<'s, B: KeyValueBackend> {
    store: &'s RecordStore<B>,
}

impl<'s, B: KeyValueBackend> ContactService<'s, B> {
    pub fn new(store: &'s RecordStore<B>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Vec<ContactMessage> {
        self.store.load(keys::CONTACTS, Vec::new())
    }

    fn load_for_write(&self) -> ServiceResult<Vec<ContactMessage>> {
        writable(self.store.load_checked(keys::CONTACTS, Vec::new()), keys::CONTACTS)
    }

    pub fn submit(&self, draft: ContactDraft) -> ServiceResult<ContactMessage> {
        draft.validate()?;
        let mut messages = self.load_for_write()?;
        let message = ContactMessage::from_draft(new_record_id(), draft, Utc::now());
        messages.push(message.clone());
        self.store.save(keys::CONTACTS, &messages);
        info!("event=contact_submit module=service status=ok id={}", message.id);
        Ok(message)
    }

    /// All messages, newest first.
    pub fn list(&self) -> Vec<ContactMessage> {
        let mut messages = self.load_all();
        sort_newest_first(&mut messages, |message| Some(message.created_at));
        messages
    }

    pub fn filter(&self, filter: &ContactFilter) -> Vec<ContactMessage> {
        self.list()
            .into_iter()
            .filter(|message| filter.matches(message))
            .collect()
    }

    /// Moves a message to `status` and stamps `updated_at`.
    pub fn update_status(&self, id: &str, status: ContactStatus) -> ServiceResult<ContactMessage> {
        let mut messages = self.load_for_write()?;
        let now = Utc::now();
        let mut updated = None;
        update_by_id(&mut messages, id, |message| {
            message.status = status;
            message.updated_at = Some(now);
            updated = Some(message.clone());
        });
        let Some(updated) = updated else {
            return Err(ServiceError::not_found(keys::CONTACTS, id));
        };
        self.store.save(keys::CONTACTS, &messages);
        info!(
            "event=contact_status module=service status=ok id={id} contact_status={}",
            status.as_str()
        );
        Ok(updated)
    }
}
