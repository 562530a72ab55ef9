//! Event records and category labels.

use super::validation::{require, ValidationError};
use super::{trimmed_or_none, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Event category. Labels outside the admin form's list round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Meeting,
    Adventure,
    Workshop,
    Charity,
    Social,
    Academic,
    Other(String),
}

impl EventCategory {
    /// Categories offered by the admin events form.
    pub const SELECTABLE: [EventCategory; 6] = [
        Self::Meeting,
        Self::Adventure,
        Self::Workshop,
        Self::Charity,
        Self::Social,
        Self::Academic,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Meeting => "Meeting",
            Self::Adventure => "Adventure",
            Self::Workshop => "Workshop",
            Self::Charity => "Charity",
            Self::Social => "Social",
            Self::Academic => "Academic",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for EventCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Meeting" => Self::Meeting,
            "Adventure" => Self::Adventure,
            "Workshop" => Self::Workshop,
            "Charity" => Self::Charity,
            "Social" => Self::Social,
            "Academic" => Self::Academic,
            _ => Self::Other(value),
        }
    }
}

impl From<EventCategory> for String {
    fn from(value: EventCategory) -> Self {
        match value {
            EventCategory::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association event, upcoming or past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    /// Free-form display time such as `09:00 AM`.
    pub event_time: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub expected_attendees: u32,
    pub actual_attendees: u32,
    pub is_past: bool,
    pub images: Option<Vec<String>>,
    pub highlight: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Event {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Editable event fields as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub location: String,
    pub category: EventCategory,
    pub expected_attendees: u32,
    pub actual_attendees: u32,
    pub is_past: bool,
    pub images: Option<Vec<String>>,
    pub highlight: Option<String>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("location", &self.location)?;
        Ok(())
    }
}

impl Event {
    pub fn from_draft(id: String, draft: EventDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            event_date: draft.event_date,
            event_time: trimmed_or_none(draft.event_time.as_deref()),
            location: draft.location,
            category: draft.category,
            expected_attendees: draft.expected_attendees,
            actual_attendees: draft.actual_attendees,
            is_past: draft.is_past,
            images: draft.images.filter(|images| !images.is_empty()),
            highlight: trimmed_or_none(draft.highlight.as_deref()),
            created_at,
        }
    }

    /// Replaces the editable fields, keeping `id` and `created_at`.
    pub fn apply_draft(&mut self, draft: EventDraft) {
        *self = Self::from_draft(std::mem::take(&mut self.id), draft, self.created_at);
    }
}

/// Splits a comma-separated URL field into a list; blank input yields `None`.
pub fn parse_image_list(raw: &str) -> Option<Vec<String>> {
    let images: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_image_list, EventCategory};

    #[test]
    fn parse_image_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_image_list(" a.png, ,b.png "),
            Some(vec!["a.png".to_string(), "b.png".to_string()])
        );
        assert_eq!(parse_image_list(" , "), None);
    }

    #[test]
    fn category_keeps_unknown_labels() {
        let category: EventCategory = serde_json::from_str("\"Sports\"").unwrap();
        assert_eq!(category.as_str(), "Sports");
        let known: EventCategory = serde_json::from_str("\"Charity\"").unwrap();
        assert_eq!(known, EventCategory::Charity);
    }
}
