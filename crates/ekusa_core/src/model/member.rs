//! Member records, upload drafts and the cached member snapshot.
//!
//! # Invariants
//! - `registration_number` is the natural key used for upsert matching.
//! - Seeded members carry no timestamps; overlay members always carry
//!   `created_at`, and `updated_at` once re-uploaded.

use super::validation::{require, ValidationError};
use super::{trimmed_or_none, Record};
use crate::store::merge::OverlayRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Membership status label. Unknown labels round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberStatus {
    Active,
    Inactive,
    Other(String),
}

impl MemberStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for MemberStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<MemberStatus> for String {
    fn from(value: MemberStatus) -> Self {
        match value {
            MemberStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for MemberStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association member, either seeded or added through uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Natural key, e.g. `B123-01-0001/2021`.
    pub registration_number: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub status: Option<MemberStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Member {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Member {
    /// Builds an overlay member from an accepted draft.
    pub fn from_draft(id: String, draft: MemberDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            registration_number: draft.registration_number,
            email: draft.email,
            phone_number: draft.phone_number,
            course: draft.course,
            year_of_study: draft.year_of_study,
            status: None,
            created_at: Some(created_at),
            updated_at: None,
        }
    }

    /// Overwrites every draft-carried field and stamps `updated_at`.
    ///
    /// Absent optional draft fields clear the stored value; `id`,
    /// `status` and `created_at` are preserved.
    pub fn absorb_draft(&mut self, draft: MemberDraft, updated_at: DateTime<Utc>) {
        self.name = draft.name;
        self.registration_number = draft.registration_number;
        self.email = draft.email;
        self.phone_number = draft.phone_number;
        self.course = draft.course;
        self.year_of_study = draft.year_of_study;
        self.updated_at = Some(updated_at);
    }

    /// Exact match on the trimmed registration number.
    pub fn has_registration_number(&self, registration_number: &str) -> bool {
        self.registration_number.trim() == registration_number.trim()
    }

    /// Case-insensitive match on the trimmed name.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl OverlayRecord for Member {
    type Draft = MemberDraft;

    fn create_from_draft(id: String, draft: MemberDraft, created_at: DateTime<Utc>) -> Self {
        Self::from_draft(id, draft, created_at)
    }

    fn absorb(&mut self, draft: MemberDraft, updated_at: DateTime<Utc>) {
        self.absorb_draft(draft, updated_at);
    }
}

/// Candidate member row produced by an upload, before it gets an identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberDraft {
    pub registration_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
}

impl MemberDraft {
    pub fn new(registration_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into().trim().to_string(),
            name: name.into().trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = trimmed_or_none(Some(email.into().as_str()));
        self
    }

    /// Parses one spreadsheet row (a JSON object keyed by column header).
    ///
    /// Accepts the header aliases `reg_number`/`reg`, `phone` and `year`.
    /// Returns `None` when the row lacks a registration number or a name.
    pub fn from_row(row: &Value) -> Option<Self> {
        let object = row.as_object()?;
        let draft = Self {
            registration_number: row_cell(object, &["registration_number", "reg_number", "reg"])?,
            name: row_cell(object, &["name"])?,
            email: row_cell(object, &["email"]),
            phone_number: row_cell(object, &["phone_number", "phone"]),
            course: row_cell(object, &["course"]),
            year_of_study: row_cell(object, &["year_of_study", "year"]),
        };
        Some(draft)
    }

    /// Rejects drafts with a blank natural key or name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("registration_number", &self.registration_number)?;
        require("name", &self.name)?;
        Ok(())
    }
}

fn row_cell(object: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|alias| object.get(*alias).and_then(cell_text))
        .and_then(|text| trimmed_or_none(Some(text.as_str())))
}

// Spreadsheet cells arrive as strings or numbers; empty cells count as missing.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Result of parsing a batch of uploaded rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUpload {
    pub accepted: Vec<MemberDraft>,
    /// Rows skipped for missing registration number or name.
    pub rejected: usize,
}

/// Parses uploaded rows, keeping only rows with both required columns.
pub fn parse_upload_rows(rows: &[Value]) -> ParsedUpload {
    let mut parsed = ParsedUpload::default();
    for row in rows {
        match MemberDraft::from_row(row) {
            Some(draft) => parsed.accepted.push(draft),
            None => parsed.rejected += 1,
        }
    }
    parsed
}

/// Verified member cached under the `ekusa_member` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: String,
    pub name: String,
    pub registration_number: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
}

impl From<&Member> for MemberSnapshot {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            registration_number: member.registration_number.clone(),
            email: member.email.clone(),
            phone_number: member.phone_number.clone(),
            course: member.course.clone(),
            year_of_study: member.year_of_study.clone(),
        }
    }
}
