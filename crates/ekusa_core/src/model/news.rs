//! News article records.

use super::validation::{require, ValidationError};
use super::{trimmed_or_none, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// News category. Unknown labels round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NewsCategory {
    Achievement,
    Scholarship,
    Announcement,
    Program,
    CommunityService,
    Workshop,
    Events,
    Other(String),
}

impl NewsCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Achievement => "Achievement",
            Self::Scholarship => "Scholarship",
            Self::Announcement => "Announcement",
            Self::Program => "Program",
            Self::CommunityService => "Community Service",
            Self::Workshop => "Workshop",
            Self::Events => "Events",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for NewsCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Achievement" => Self::Achievement,
            "Scholarship" => Self::Scholarship,
            "Announcement" => Self::Announcement,
            "Program" => Self::Program,
            "Community Service" => Self::CommunityService,
            "Workshop" => Self::Workshop,
            "Events" => Self::Events,
            _ => Self::Other(value),
        }
    }
}

impl From<NewsCategory> for String {
    fn from(value: NewsCategory) -> Self {
        match value {
            NewsCategory::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for NewsCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: NewsCategory,
    pub featured: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for NewsItem {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: NewsCategory,
    pub featured: bool,
    pub image: Option<String>,
}

impl NewsDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("content", &self.content)?;
        Ok(())
    }
}

impl NewsItem {
    pub fn from_draft(id: String, draft: NewsDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            author: draft.author,
            category: draft.category,
            featured: draft.featured,
            image: trimmed_or_none(draft.image.as_deref()),
            created_at,
        }
    }

    /// Replaces the editable fields, keeping `id` and `created_at`.
    pub fn apply_draft(&mut self, draft: NewsDraft) {
        *self = Self::from_draft(std::mem::take(&mut self.id), draft, self.created_at);
    }
}
