use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::notes::{
    CreateNoteRequest, CreateTagRequest, ListPostsQuery, NoteSummary, RecognizeWineRequest, Tag,
    UpdateNoteRequest,
};

use super::{Credentials, Result};

/// The remote notes/tags/wines service.
///
/// Every call carries the browser's [`Credentials`] so the remote side can
/// decide what the viewer may see.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Lists the notes of a journal day.
    async fn list_notes(&self, creds: &Credentials, date: NaiveDate) -> Result<Vec<NoteSummary>>;

    /// Gets a note by its ID.
    async fn get_note(&self, creds: &Credentials, id: &str) -> Result<NoteSummary>;

    /// Creates a note.
    async fn create_note(
        &self,
        creds: &Credentials,
        request: &CreateNoteRequest,
    ) -> Result<NoteSummary>;

    /// Updates an existing note.
    async fn update_note(
        &self,
        creds: &Credentials,
        id: &str,
        request: &UpdateNoteRequest,
    ) -> Result<NoteSummary>;

    /// Deletes a note by its ID.
    async fn delete_note(&self, creds: &Credentials, id: &str) -> Result<()>;

    /// Lists published posts.
    async fn list_posts(&self, creds: &Credentials, query: &ListPostsQuery) -> Result<Value>;

    /// Gets a post by its ID.
    async fn get_post(&self, creds: &Credentials, id: &str) -> Result<Value>;

    /// Lists all tags.
    async fn list_tags(&self, creds: &Credentials) -> Result<Vec<Tag>>;

    /// Creates a tag.
    async fn create_tag(&self, creds: &Credentials, request: &CreateTagRequest) -> Result<Tag>;

    /// Runs wine label recognition on an image.
    async fn recognize_wine(
        &self,
        creds: &Credentials,
        request: &RecognizeWineRequest,
    ) -> Result<Value>;

    /// Short description of the backend, for health output.
    fn describe(&self) -> String;
}
