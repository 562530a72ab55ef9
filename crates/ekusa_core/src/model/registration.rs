//! Event registrations and member interest markers.

use super::validation::{require, ValidationError};
use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration submitted by a non-member for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub id: String,
    /// Not enforced; may dangle after the event is deleted.
    pub event_id: String,
    pub name: String,
    pub course: String,
    pub registration_number: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl Record for EventRegistration {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationDraft {
    pub name: String,
    pub course: String,
    pub registration_number: String,
    pub phone_number: String,
}

impl RegistrationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("course", &self.course)?;
        require("registration_number", &self.registration_number)?;
        require("phone_number", &self.phone_number)?;
        Ok(())
    }
}

impl EventRegistration {
    pub fn from_draft(
        id: String,
        event_id: impl Into<String>,
        draft: RegistrationDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id: event_id.into(),
            name: draft.name.trim().to_string(),
            course: draft.course.trim().to_string(),
            registration_number: draft.registration_number.trim().to_string(),
            phone_number: draft.phone_number.trim().to_string(),
            created_at,
        }
    }
}

/// A member's interest in an event; identified only by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventInterest {
    pub member_id: String,
    pub event_id: String,
}
