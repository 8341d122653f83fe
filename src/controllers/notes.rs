//! Notes Controller

use std::future::Future;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use super::{lock, Confirm, DetailPane, Generation, Outcome, PaneState};
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{Note, NoteFields};

/// Which notes the list shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoteFilter {
    #[default]
    All,
    Search(String),
    Tag(String),
}

#[derive(Debug, Default)]
struct NotesState {
    notes: Vec<Note>,
    current: Option<Note>,
    pane: DetailPane,
    filter: NoteFilter,
    /// Bumped per list fetch so only the newest response lands
    list_generation: u64,
}

#[derive(Clone)]
pub struct NotesController {
    api: ApiClient,
    state: Arc<Mutex<NotesState>>,
}

impl NotesController {
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Arc::new(Mutex::new(NotesState::default())) }
    }

    pub fn notes(&self) -> Vec<Note> {
        lock(&self.state).notes.clone()
    }

    pub fn current(&self) -> Option<Note> {
        lock(&self.state).current.clone()
    }

    pub fn pane_state(&self) -> PaneState {
        lock(&self.state).pane.state()
    }

    pub fn filter(&self) -> NoteFilter {
        lock(&self.state).filter.clone()
    }

    /// Drop the whole collection and close the pane
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        state.notes.clear();
        state.current = None;
        state.filter = NoteFilter::All;
        state.pane.close();
        state.list_generation += 1;
    }

    /// Replace the collection with every note of the user
    pub async fn fetch_all(&self) -> ClientResult<Outcome<usize>> {
        lock(&self.state).filter = NoteFilter::All;
        self.refresh().await
    }

    /// Server-side search; an empty query shows everything again
    pub async fn search(&self, query: &str) -> ClientResult<Outcome<usize>> {
        let query = query.trim();
        lock(&self.state).filter = if query.is_empty() {
            NoteFilter::All
        } else {
            NoteFilter::Search(query.to_string())
        };
        self.refresh().await
    }

    pub async fn filter_by_tag(&self, tag: &str) -> ClientResult<Outcome<usize>> {
        let tag = tag.trim();
        lock(&self.state).filter = if tag.is_empty() {
            NoteFilter::All
        } else {
            NoteFilter::Tag(tag.to_string())
        };
        self.refresh().await
    }

    /// Re-run the active filter
    pub async fn refresh(&self) -> ClientResult<Outcome<usize>> {
        let (filter, generation) = {
            let mut state = lock(&self.state);
            state.list_generation += 1;
            (state.filter.clone(), state.list_generation)
        };

        let notes = match &filter {
            NoteFilter::All => self.api.list_notes().await?,
            NoteFilter::Search(query) => self.api.search_notes(query).await?,
            NoteFilter::Tag(tag) => self.api.notes_by_tag(tag).await?,
        };

        let mut state = lock(&self.state);
        if state.list_generation != generation {
            debug!("Dropping stale notes list");
            return Ok(Outcome::Discarded);
        }
        let count = notes.len();
        state.notes = notes;
        Ok(Outcome::Applied(count))
    }

    /// Open one note in the detail pane. The navigation is registered before
    /// the returned future is first polled, so later clicks win.
    pub fn select(&self, id: u64) -> impl Future<Output = ClientResult<Outcome<Note>>> + 'static {
        let ticket = lock(&self.state).pane.begin();
        let this = self.clone();
        async move { this.finish_select(id, ticket).await }
    }

    async fn finish_select(&self, id: u64, ticket: Generation) -> ClientResult<Outcome<Note>> {
        let note = self.api.get_note(id).await?;

        let mut state = lock(&self.state);
        if !state.pane.is_current(ticket) {
            debug!("Dropping stale note {id}");
            return Ok(Outcome::Discarded);
        }
        state.pane.show(id);
        state.current = Some(note.clone());
        Ok(Outcome::Applied(note))
    }

    /// Empty form for a note that does not exist yet
    pub fn create_new(&self) {
        let mut state = lock(&self.state);
        state.pane.edit_new();
        state.current = None;
    }

    /// Close the pane without touching the collection
    pub fn close(&self) {
        let mut state = lock(&self.state);
        state.pane.close();
        state.current = None;
    }

    /// Create when the open note has no id, update otherwise
    pub async fn save(&self, fields: &NoteFields) -> ClientResult<Outcome<Note>> {
        if fields.title.trim().is_empty() {
            return Err(ClientError::Validation("Note title is required".to_string()));
        }

        let (ticket, current_id) = {
            let state = lock(&self.state);
            (state.pane.ticket(), state.pane.current_id())
        };

        match current_id {
            None => {
                let created = self.api.create_note(fields).await?;
                let id = created
                    .id
                    .ok_or_else(|| ClientError::Decode("created note has no id".to_string()))?;
                self.refresh_quietly().await;
                if !lock(&self.state).pane.is_current(ticket) {
                    return Ok(Outcome::Discarded);
                }
                self.select(id).await
            }
            Some(id) => {
                let updated = self.api.update_note(id, fields).await?;
                let applied = {
                    let mut state = lock(&self.state);
                    if state.pane.is_current(ticket) {
                        state.current = Some(updated.clone());
                        true
                    } else {
                        false
                    }
                };
                self.refresh_quietly().await;
                Ok(if applied { Outcome::Applied(updated) } else { Outcome::Discarded })
            }
        }
    }

    /// Delete the open note after confirmation. `Ok(false)` when the user declined.
    pub async fn delete(&self, confirm: &dyn Confirm) -> ClientResult<bool> {
        let id = lock(&self.state)
            .pane
            .current_id()
            .ok_or(ClientError::NoSelection("note"))?;
        if !confirm.confirm("Are you sure you want to delete this note?") {
            return Ok(false);
        }

        self.api.delete_note(id).await?;
        {
            let mut state = lock(&self.state);
            state.notes.retain(|n| n.id != Some(id));
            if state.pane.current_id() == Some(id) {
                state.pane.close();
                state.current = None;
            }
        }
        self.refresh_quietly().await;
        Ok(true)
    }

    /// List refresh after a successful write; a failure keeps the old list
    async fn refresh_quietly(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Notes list not refreshed: {e}");
        }
    }
}
