//! Todo-Lists Controller

use std::future::Future;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use super::{lock, Confirm, DetailPane, Generation, Outcome, PaneState};
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{TodoList, TodoListFields};

#[derive(Debug, Default)]
struct TodoListsState {
    lists: Vec<TodoList>,
    current: Option<TodoList>,
    pane: DetailPane,
    /// Active search query, empty for "all"
    query: String,
    list_generation: u64,
}

#[derive(Clone)]
pub struct TodoListsController {
    api: ApiClient,
    state: Arc<Mutex<TodoListsState>>,
}

impl TodoListsController {
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Arc::new(Mutex::new(TodoListsState::default())) }
    }

    pub fn lists(&self) -> Vec<TodoList> {
        lock(&self.state).lists.clone()
    }

    pub fn current(&self) -> Option<TodoList> {
        lock(&self.state).current.clone()
    }

    pub fn current_id(&self) -> Option<u64> {
        lock(&self.state).pane.current_id()
    }

    pub fn pane_state(&self) -> PaneState {
        lock(&self.state).pane.state()
    }

    pub fn query(&self) -> String {
        lock(&self.state).query.clone()
    }

    pub fn reset(&self) {
        let mut state = lock(&self.state);
        state.lists.clear();
        state.current = None;
        state.query.clear();
        state.pane.close();
        state.list_generation += 1;
    }

    pub async fn fetch_all(&self) -> ClientResult<Outcome<usize>> {
        lock(&self.state).query.clear();
        self.refresh().await
    }

    pub async fn search(&self, query: &str) -> ClientResult<Outcome<usize>> {
        lock(&self.state).query = query.trim().to_string();
        self.refresh().await
    }

    pub async fn refresh(&self) -> ClientResult<Outcome<usize>> {
        let (query, generation) = {
            let mut state = lock(&self.state);
            state.list_generation += 1;
            (state.query.clone(), state.list_generation)
        };

        let lists = if query.is_empty() {
            self.api.list_todo_lists().await?
        } else {
            self.api.search_todo_lists(&query).await?
        };

        let mut state = lock(&self.state);
        if state.list_generation != generation {
            debug!("Dropping stale todo-list list");
            return Ok(Outcome::Discarded);
        }
        let count = lists.len();
        state.lists = lists;
        Ok(Outcome::Applied(count))
    }

    /// Open one list. Registered immediately; an older pending select loses.
    pub fn select(&self, id: u64) -> impl Future<Output = ClientResult<Outcome<TodoList>>> + 'static {
        let ticket = lock(&self.state).pane.begin();
        let this = self.clone();
        async move { this.finish_select(id, ticket).await }
    }

    async fn finish_select(&self, id: u64, ticket: Generation) -> ClientResult<Outcome<TodoList>> {
        let list = self.api.get_todo_list(id).await?;

        let mut state = lock(&self.state);
        if !state.pane.is_current(ticket) {
            debug!("Dropping stale todo list {id}");
            return Ok(Outcome::Discarded);
        }
        state.pane.show(id);
        state.current = Some(list.clone());
        Ok(Outcome::Applied(list))
    }

    pub fn create_new(&self) {
        let mut state = lock(&self.state);
        state.pane.edit_new();
        state.current = None;
    }

    pub fn close(&self) {
        let mut state = lock(&self.state);
        state.pane.close();
        state.current = None;
    }

    pub async fn save(&self, fields: &TodoListFields) -> ClientResult<Outcome<TodoList>> {
        if fields.name.trim().is_empty() {
            return Err(ClientError::Validation("Todo list name is required".to_string()));
        }

        let (ticket, current_id) = {
            let state = lock(&self.state);
            (state.pane.ticket(), state.pane.current_id())
        };

        match current_id {
            None => {
                let created = self.api.create_todo_list(fields).await?;
                let id = created
                    .id
                    .ok_or_else(|| ClientError::Decode("created todo list has no id".to_string()))?;
                self.refresh_quietly().await;
                if !lock(&self.state).pane.is_current(ticket) {
                    return Ok(Outcome::Discarded);
                }
                self.select(id).await
            }
            Some(id) => {
                let updated = self.api.update_todo_list(id, fields).await?;
                let applied = {
                    let mut state = lock(&self.state);
                    let current = state.pane.is_current(ticket);
                    if current {
                        state.current = Some(updated.clone());
                    }
                    current
                };
                self.refresh_quietly().await;
                Ok(if applied { Outcome::Applied(updated) } else { Outcome::Discarded })
            }
        }
    }

    /// Delete the open list after confirmation. `Ok(false)` when declined.
    pub async fn delete(&self, confirm: &dyn Confirm) -> ClientResult<bool> {
        let id = lock(&self.state)
            .pane
            .current_id()
            .ok_or(ClientError::NoSelection("todo list"))?;
        if !confirm.confirm("Are you sure you want to delete this todo list?") {
            return Ok(false);
        }

        self.api.delete_todo_list(id).await?;
        {
            let mut state = lock(&self.state);
            state.lists.retain(|l| l.id != Some(id));
            if state.pane.current_id() == Some(id) {
                state.pane.close();
                state.current = None;
            }
        }
        self.refresh_quietly().await;
        Ok(true)
    }

    async fn refresh_quietly(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Todo-list list not refreshed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::test_support::client_with_token;
    use crate::transport::Method;
    use crate::view::todo_list_entries;

    fn fields(name: &str) -> TodoListFields {
        TodoListFields { name: name.into(), description: String::new() }
    }

    #[tokio::test]
    async fn test_rendered_entries_follow_envelope() {
        let (api, mock) = client_with_token();
        mock.on(
            Method::Get,
            "/api/todo-lists",
            200,
            json!({"content": [{"id": 5, "name": "Groceries"}, {"id": 6, "name": "Chores"}]}),
        );
        mock.on(Method::Get, "/api/todo-lists", 200, json!({"content": null}));
        let lists = TodoListsController::new(api);

        lists.fetch_all().await.unwrap();
        let entries = todo_list_entries(&lists.lists(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].label, "Chores");

        lists.fetch_all().await.unwrap();
        assert!(todo_list_entries(&lists.lists(), None).is_empty());
    }

    #[tokio::test]
    async fn test_empty_name_sends_nothing() {
        let (api, mock) = client_with_token();
        let lists = TodoListsController::new(api);

        let err = lists.save(&fields("")).await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Todo list name is required".to_string()));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_selects_returned_id() {
        let (api, mock) = client_with_token();
        mock.on(Method::Post, "/api/todo-lists", 201, json!({"id": 5, "name": "Groceries"}));
        mock.on(Method::Get, "/api/todo-lists", 200, json!({"content": [{"id": 5, "name": "Groceries"}]}));
        mock.on(Method::Get, "/api/todo-lists/5", 200, json!({"id": 5, "name": "Groceries"}));
        let lists = TodoListsController::new(api);
        lists.create_new();

        lists.save(&fields("Groceries")).await.unwrap();
        assert_eq!(lists.pane_state(), PaneState::Viewing(5));
        assert_eq!(lists.lists().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let (api, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists/5", 200, json!({"id": 5, "name": "Groceries"}));
        mock.on(Method::Put, "/api/todo-lists/5", 200, json!({"id": 5, "name": "Groceries", "description": "weekly"}));
        mock.on(Method::Get, "/api/todo-lists", 200, json!({"content": [{"id": 5, "name": "Groceries"}]}));
        let lists = TodoListsController::new(api);
        lists.select(5).await.unwrap();

        let saved = lists.save(&fields("Groceries")).await.unwrap().applied().unwrap();
        assert_eq!(saved.id, Some(5));
        assert_eq!(lists.pane_state(), PaneState::Viewing(5));
        assert_eq!(lists.current().unwrap().description.as_deref(), Some("weekly"));
    }

    #[tokio::test]
    async fn test_delete_open_list() {
        let (api, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists", 200, json!({"content": [{"id": 5, "name": "a"}, {"id": 6, "name": "b"}]}));
        mock.on(Method::Get, "/api/todo-lists/5", 200, json!({"id": 5, "name": "a"}));
        mock.on_raw(Method::Delete, "/api/todo-lists/5", 204, "");
        mock.on(Method::Get, "/api/todo-lists", 200, json!({"content": [{"id": 6, "name": "b"}]}));
        let lists = TodoListsController::new(api);
        lists.fetch_all().await.unwrap();
        lists.select(5).await.unwrap();

        assert!(lists.delete(&|_: &str| true).await.unwrap());
        assert_eq!(lists.pane_state(), PaneState::Empty);
        assert!(lists.current().is_none());
        assert!(lists.lists().iter().all(|l| l.id != Some(5)));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state() {
        let (api, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists/5", 200, json!({"id": 5, "name": "a"}));
        mock.on(Method::Delete, "/api/todo-lists/5", 500, json!({}));
        let lists = TodoListsController::new(api);
        lists.select(5).await.unwrap();

        let err = lists.delete(&|_: &str| true).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete todo list");
        assert_eq!(lists.pane_state(), PaneState::Viewing(5));
    }

    #[tokio::test]
    async fn test_rapid_reselection_keeps_latest() {
        let (api, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists/1", 200, json!({"id": 1, "name": "first"}));
        mock.on(Method::Get, "/api/todo-lists/2", 200, json!({"id": 2, "name": "second"}));
        let lists = TodoListsController::new(api);

        let first = lists.select(1);
        let second = lists.select(2);
        // The later click's response arrives first
        assert!(second.await.unwrap().is_applied());
        assert_eq!(first.await.unwrap(), Outcome::Discarded);
        assert_eq!(lists.current().unwrap().name, "second");
    }
}
