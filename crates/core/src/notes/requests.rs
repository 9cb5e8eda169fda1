//! Request payloads and query strings for the notes API.
//!
//! Shared by the HTTP shell and the upstream client so both sides agree on
//! the wire format (camelCase JSON).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::types::NoteSummary;
use crate::serde::{deserialize_optional_date, deserialize_optional_string, deserialize_optional_u32};

/// Query string of the notes list (`?date=YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotesQuery {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}

/// Query string of the posts list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,
}

/// Request payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl CreateNoteRequest {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            date,
            tags: Vec::new(),
            is_private: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builds the stored note, stamping `updatedAt` with `now`.
    pub fn into_note(self, id: impl Into<String>, now: DateTime<Utc>) -> NoteSummary {
        let mut note = NoteSummary::new(id)
            .with_title(self.title)
            .with_date(self.date)
            .with_updated_at(now.to_rfc3339_opts(SecondsFormat::Millis, true))
            .with_tags(self.tags);
        note.content = Some(self.content);
        note.is_private = self.is_private;
        note
    }
}

/// Request payload for updating a note. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

impl UpdateNoteRequest {
    /// Applies the changes and bumps `updatedAt`.
    pub fn apply_to(self, note: &mut NoteSummary, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            note.title = Some(title);
        }
        if let Some(content) = self.content {
            note.content = Some(content);
        }
        if let Some(date) = self.date {
            note.date = Some(date.format("%Y-%m-%d").to_string());
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
        if let Some(is_private) = self.is_private {
            note.is_private = is_private;
        }
        note.updated_at = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
    }
}

/// Request payload for creating a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Wine label recognition request: a base64 payload or an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeWineRequest {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}
