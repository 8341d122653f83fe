//! Note & Tag Endpoints

use super::{encode, ApiClient};
use crate::error::ClientResult;
use crate::models::{Note, NoteFields, Tag};
use crate::transport::Method;

impl ApiClient {
    pub async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        self.fetch_page("/api/notes", "fetch notes").await
    }

    pub async fn get_note(&self, id: u64) -> ClientResult<Note> {
        self.request::<_, ()>(Method::Get, &format!("/api/notes/{id}"), None, "fetch note")
            .await
    }

    pub async fn create_note(&self, fields: &NoteFields) -> ClientResult<Note> {
        self.request(Method::Post, "/api/notes", Some(fields), "save note").await
    }

    pub async fn update_note(&self, id: u64, fields: &NoteFields) -> ClientResult<Note> {
        self.request(Method::Put, &format!("/api/notes/{id}"), Some(fields), "save note")
            .await
    }

    pub async fn delete_note(&self, id: u64) -> ClientResult<()> {
        self.request_raw::<()>(Method::Delete, &format!("/api/notes/{id}"), None, "delete note")
            .await?;
        Ok(())
    }

    /// Full-text search over the user's notes
    pub async fn search_notes(&self, query: &str) -> ClientResult<Vec<Note>> {
        let path = format!("/api/notes/search?query={}", encode(query));
        self.fetch_page(&path, "search notes").await
    }

    pub async fn notes_by_tag(&self, tag: &str) -> ClientResult<Vec<Note>> {
        let path = format!("/api/notes/tags/{}", encode(tag));
        self.fetch_page(&path, "fetch notes by tag").await
    }

    /// Every tag known to the server (plain array, not paged)
    pub async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        self.request::<_, ()>(Method::Get, "/api/tags", None, "fetch tags").await
    }
}
