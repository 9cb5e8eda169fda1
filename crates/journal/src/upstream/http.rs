//! `reqwest` client for the remote notes API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use journal_core::notes::{
    CreateNoteRequest, CreateTagRequest, ListPostsQuery, NoteSummary, RecognizeWineRequest, Tag,
    UpdateNoteRequest,
};
use journal_core::upstream::{Credentials, NotesApi, Result};

use super::ClientError;

/// The notes list comes back either bare or wrapped in `{ "notes": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum NotesPayload {
    Bare(Vec<NoteSummary>),
    Wrapped { notes: Vec<NoteSummary> },
}

impl NotesPayload {
    fn into_notes(self) -> Vec<NoteSummary> {
        match self {
            NotesPayload::Bare(notes) | NotesPayload::Wrapped { notes } => notes,
        }
    }
}

/// HTTP implementation of [`NotesApi`].
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesApi {
    /// Create a new client for the API at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request that carries the browser's cookie.
    fn request(&self, method: Method, path: &str, creds: &Credentials) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        match &creds.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        entity_type: &'static str,
        id: &str,
    ) -> std::result::Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(classify_failure(status, message, entity_type, id))
    }

    /// Send a request whose response body is ignored.
    async fn send_empty(
        &self,
        builder: RequestBuilder,
        entity_type: &'static str,
        id: &str,
    ) -> std::result::Result<(), ClientError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(classify_failure(status, message, entity_type, id))
    }
}

/// Turns a non-success status into a [`ClientError`].
fn classify_failure(
    status: StatusCode,
    message: String,
    entity_type: &'static str,
    id: &str,
) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self, creds: &Credentials, date: NaiveDate) -> Result<Vec<NoteSummary>> {
        let day = date.format("%Y-%m-%d").to_string();
        let builder = self
            .request(Method::GET, "/notes", creds)
            .query(&[("date", day.as_str())]);

        let payload: NotesPayload = self.send(builder, "Notes", &day).await?;
        Ok(payload.into_notes())
    }

    async fn get_note(&self, creds: &Credentials, id: &str) -> Result<NoteSummary> {
        let builder = self.request(Method::GET, &format!("/notes/{id}"), creds);
        Ok(self.send(builder, "Note", id).await?)
    }

    async fn create_note(
        &self,
        creds: &Credentials,
        request: &CreateNoteRequest,
    ) -> Result<NoteSummary> {
        let builder = self.request(Method::POST, "/notes", creds).json(request);
        Ok(self.send(builder, "Note", "new").await?)
    }

    async fn update_note(
        &self,
        creds: &Credentials,
        id: &str,
        request: &UpdateNoteRequest,
    ) -> Result<NoteSummary> {
        let builder = self
            .request(Method::PUT, &format!("/notes/{id}"), creds)
            .json(request);
        Ok(self.send(builder, "Note", id).await?)
    }

    async fn delete_note(&self, creds: &Credentials, id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("/notes/{id}"), creds);
        Ok(self.send_empty(builder, "Note", id).await?)
    }

    async fn list_posts(&self, creds: &Credentials, query: &ListPostsQuery) -> Result<Value> {
        let builder = self.request(Method::GET, "/posts", creds).query(query);
        Ok(self.send(builder, "Posts", "list").await?)
    }

    async fn get_post(&self, creds: &Credentials, id: &str) -> Result<Value> {
        let builder = self.request(Method::GET, &format!("/posts/{id}"), creds);
        Ok(self.send(builder, "Post", id).await?)
    }

    async fn list_tags(&self, creds: &Credentials) -> Result<Vec<Tag>> {
        let builder = self.request(Method::GET, "/tags", creds);
        Ok(self.send(builder, "Tags", "list").await?)
    }

    async fn create_tag(&self, creds: &Credentials, request: &CreateTagRequest) -> Result<Tag> {
        let builder = self.request(Method::POST, "/tags", creds).json(request);
        Ok(self.send(builder, "Tag", &request.name).await?)
    }

    async fn recognize_wine(
        &self,
        creds: &Credentials,
        request: &RecognizeWineRequest,
    ) -> Result<Value> {
        let builder = self
            .request(Method::POST, "/wines/recognize", creds)
            .json(request);
        Ok(self.send(builder, "Wine", "label").await?)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
