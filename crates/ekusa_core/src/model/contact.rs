//! Contact messages sent through the public contact form.

use super::validation::{require, ValidationError};
use super::Record;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Admin triage state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Messages stored by the public form before triage carry no status.
    #[serde(default)]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for ContactMessage {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl ContactMessage {
    pub fn from_draft(id: String, draft: ContactDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            message: draft.message,
            status: ContactStatus::New,
            created_at,
            updated_at: None,
        }
    }

    /// Case-insensitive substring match over name, email and subject.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.subject]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Public contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)?;
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}
