//! In-memory implementation of the remote API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, SecondsFormat};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use journal_core::cache_policy::{reference_today, Clock};
use journal_core::notes::{
    filter_notes_by_date, filter_posts, CreateNoteRequest, CreateTagRequest, ListPostsQuery,
    NoteSummary, RecognizeWineRequest, Tag, UpdateNoteRequest,
};
use journal_core::upstream::{Credentials, NotesApi, Result, UpstreamError};

const POSTS_PAGE_SIZE: usize = 10;

/// In-memory notes backend.
///
/// Private notes are only visible to authenticated viewers and writes
/// require authentication, mirroring the remote API. Data is lost when
/// the value is dropped.
#[derive(Clone)]
pub struct InMemoryNotesApi {
    notes: Arc<RwLock<HashMap<String, NoteSummary>>>,
    tags: Arc<RwLock<Vec<Tag>>>,
    posts: Arc<RwLock<Vec<Value>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryNotesApi {
    /// Creates an empty backend that stamps `updatedAt` with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notes: Arc::new(RwLock::new(HashMap::new())),
            tags: Arc::new(RwLock::new(Vec::new())),
            posts: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    /// Creates a backend seeded with a few days of demo notes.
    pub fn with_demo_data(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let today = reference_today(now);
        let api = Self::new(clock);

        let mut notes = HashMap::new();
        for (offset, title, tags, private) in [
            (-2_i64, "Farmers market", vec!["food"], false),
            (-1, "Chablis with oysters", vec!["wine", "food"], false),
            (-1, "Budget review", vec![], true),
            (0, "Morning run", vec!["health"], false),
        ] {
            let date = today + Duration::days(offset);
            let updated_at = (now + Duration::days(offset)).to_rfc3339_opts(SecondsFormat::Secs, true);
            let mut note = NoteSummary::new(Uuid::new_v4().to_string())
                .with_title(title)
                .with_date(date)
                .with_updated_at(updated_at)
                .with_tags(tags.into_iter().map(str::to_string).collect());
            note.is_private = private;
            notes.insert(note.id.clone(), note);
        }

        let tags = ["food", "wine", "health"]
            .into_iter()
            .map(|name| Tag::new(Uuid::new_v4().to_string(), name))
            .collect();

        let posts = vec![json!({
            "id": Uuid::new_v4().to_string(),
            "title": "A week of wine notes",
            "tags": ["wine"],
            "publishedAt": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        })];

        Self {
            notes: Arc::new(RwLock::new(notes)),
            tags: Arc::new(RwLock::new(tags)),
            posts: Arc::new(RwLock::new(posts)),
            ..api
        }
    }

    /// Inserts a note as-is (useful for testing).
    #[cfg(test)]
    pub async fn insert_note(&self, note: NoteSummary) {
        self.notes.write().await.insert(note.id.clone(), note);
    }

    /// Inserts a post as-is (useful for testing).
    #[cfg(test)]
    pub async fn insert_post(&self, post: Value) {
        self.posts.write().await.push(post);
    }
}

fn require_session(creds: &Credentials) -> Result<()> {
    if creds.is_authenticated {
        Ok(())
    } else {
        Err(UpstreamError::Unauthorized)
    }
}

fn visible_to(note: &NoteSummary, creds: &Credentials) -> bool {
    !note.is_private || creds.is_authenticated
}

#[async_trait]
impl NotesApi for InMemoryNotesApi {
    async fn list_notes(&self, creds: &Credentials, date: NaiveDate) -> Result<Vec<NoteSummary>> {
        let notes: Vec<NoteSummary> = self.notes.read().await.values().cloned().collect();

        let mut day: Vec<NoteSummary> = filter_notes_by_date(&notes, date)
            .into_iter()
            .filter(|note| visible_to(note, creds))
            .cloned()
            .collect();
        day.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then_with(|| a.id.cmp(&b.id)));

        Ok(day)
    }

    async fn get_note(&self, creds: &Credentials, id: &str) -> Result<NoteSummary> {
        self.notes
            .read()
            .await
            .get(id)
            .filter(|note| visible_to(note, creds))
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                entity_type: "Note",
                id: id.to_string(),
            })
    }

    async fn create_note(
        &self,
        creds: &Credentials,
        request: &CreateNoteRequest,
    ) -> Result<NoteSummary> {
        require_session(creds)?;

        let note = request
            .clone()
            .into_note(Uuid::new_v4().to_string(), self.clock.now());
        self.notes
            .write()
            .await
            .insert(note.id.clone(), note.clone());

        Ok(note)
    }

    async fn update_note(
        &self,
        creds: &Credentials,
        id: &str,
        request: &UpdateNoteRequest,
    ) -> Result<NoteSummary> {
        require_session(creds)?;

        let mut notes = self.notes.write().await;
        let note = notes.get_mut(id).ok_or_else(|| UpstreamError::NotFound {
            entity_type: "Note",
            id: id.to_string(),
        })?;

        request.clone().apply_to(note, self.clock.now());
        Ok(note.clone())
    }

    async fn delete_note(&self, creds: &Credentials, id: &str) -> Result<()> {
        require_session(creds)?;

        if self.notes.write().await.remove(id).is_none() {
            return Err(UpstreamError::NotFound {
                entity_type: "Note",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_posts(&self, _creds: &Credentials, query: &ListPostsQuery) -> Result<Value> {
        let posts = self.posts.read().await;
        let page = query.page.unwrap_or(1);
        let items: Vec<&Value> =
            filter_posts(&posts, query.tag.as_deref(), page, POSTS_PAGE_SIZE);

        Ok(json!({
            "page": page.max(1),
            "posts": items,
        }))
    }

    async fn get_post(&self, _creds: &Credentials, id: &str) -> Result<Value> {
        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.get("id").and_then(Value::as_str) == Some(id))
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                entity_type: "Post",
                id: id.to_string(),
            })
    }

    async fn list_tags(&self, _creds: &Credentials) -> Result<Vec<Tag>> {
        let mut tags = self.tags.read().await.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn create_tag(&self, creds: &Credentials, request: &CreateTagRequest) -> Result<Tag> {
        require_session(creds)?;

        let mut tags = self.tags.write().await;
        if let Some(existing) = tags.iter().find(|tag| tag.name == request.name) {
            return Err(UpstreamError::Rejected {
                status: 409,
                message: format!("Tag already exists: {}", existing.name),
            });
        }

        let tag = Tag::new(Uuid::new_v4().to_string(), request.name.clone());
        tags.push(tag.clone());
        Ok(tag)
    }

    async fn recognize_wine(
        &self,
        _creds: &Credentials,
        _request: &RecognizeWineRequest,
    ) -> Result<Value> {
        Ok(json!({ "candidates": [] }))
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
