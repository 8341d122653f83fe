//! Tasks Controller
//!
//! Tasks of the open todo list. Status changes are optimistic: the row shows
//! the requested status while the PATCH is in flight and falls back to the
//! previous one if the server says no.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use super::{lock, Confirm};
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{Task, TaskFields, TaskStatus};

/// Lifecycle of one optimistic status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Pending { previous: TaskStatus, requested: TaskStatus },
    Confirmed,
    Reverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

#[derive(Debug, Default)]
struct TasksState {
    list_id: Option<u64>,
    tasks: Vec<Task>,
    toggles: HashMap<u64, ToggleState>,
    /// Latest toggle per task; an older reply must not settle a newer toggle
    toggle_seqs: HashMap<u64, u64>,
    toggle_seq: u64,
    filter: TaskStatusFilter,
    /// Task loaded into the edit field
    selected: Option<Task>,
    /// Bumped whenever the owning list changes
    generation: u64,
    fetch_generation: u64,
}

impl TasksState {
    fn still_on(&self, list_id: u64, generation: u64) -> bool {
        self.list_id == Some(list_id) && self.generation == generation
    }
}

#[derive(Clone)]
pub struct TasksController {
    api: ApiClient,
    state: Arc<Mutex<TasksState>>,
}

impl TasksController {
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Arc::new(Mutex::new(TasksState::default())) }
    }

    pub fn list_id(&self) -> Option<u64> {
        lock(&self.state).list_id
    }

    pub fn tasks(&self) -> Vec<Task> {
        lock(&self.state).tasks.clone()
    }

    pub fn filter(&self) -> TaskStatusFilter {
        lock(&self.state).filter
    }

    pub fn selected(&self) -> Option<Task> {
        lock(&self.state).selected.clone()
    }

    pub fn toggle_state(&self, task_id: u64) -> Option<ToggleState> {
        lock(&self.state).toggles.get(&task_id).copied()
    }

    /// Status the row's checkbox shows: the requested one while pending
    pub fn displayed_status(&self, task: &Task) -> TaskStatus {
        match lock(&self.state).toggles.get(&task.id) {
            Some(ToggleState::Pending { requested, .. }) => *requested,
            _ => task.status,
        }
    }

    /// Point at another list; everything from the previous one is dropped
    pub fn open(&self, list_id: u64) {
        let mut state = lock(&self.state);
        let generation = state.generation + 1;
        *state = TasksState { list_id: Some(list_id), generation, ..Default::default() };
    }

    pub fn close(&self) {
        let mut state = lock(&self.state);
        let generation = state.generation + 1;
        *state = TasksState { generation, ..Default::default() };
    }

    fn open_list(&self) -> ClientResult<(u64, u64)> {
        let state = lock(&self.state);
        let list_id = state.list_id.ok_or(ClientError::NoSelection("todo list"))?;
        Ok((list_id, state.generation))
    }

    pub async fn fetch_all(&self) -> ClientResult<usize> {
        let (list_id, generation) = self.open_list()?;
        let (filter, fetch_generation) = {
            let mut state = lock(&self.state);
            state.fetch_generation += 1;
            (state.filter, state.fetch_generation)
        };

        let tasks = match filter {
            TaskStatusFilter::All => self.api.list_tasks(list_id).await?,
            TaskStatusFilter::Only(status) => self.api.tasks_by_status(list_id, status).await?,
        };

        let mut state = lock(&self.state);
        if !state.still_on(list_id, generation) || state.fetch_generation != fetch_generation {
            debug!("Dropping stale tasks of list {list_id}");
            return Ok(state.tasks.len());
        }
        state.toggles.retain(|_, t| matches!(t, ToggleState::Pending { .. }));
        state.tasks = tasks;
        Ok(state.tasks.len())
    }

    pub async fn filter_by_status(&self, filter: TaskStatusFilter) -> ClientResult<usize> {
        lock(&self.state).filter = filter;
        self.fetch_all().await
    }

    /// Load one task into the edit field
    pub async fn select(&self, task_id: u64) -> ClientResult<Task> {
        let (list_id, generation) = self.open_list()?;
        let task = self.api.get_task(list_id, task_id).await?;
        let mut state = lock(&self.state);
        if state.still_on(list_id, generation) {
            state.selected = Some(task.clone());
        }
        Ok(task)
    }

    pub fn clear_selection(&self) {
        lock(&self.state).selected = None;
    }

    /// Create a task, or update the selected one
    pub async fn save(&self, fields: &TaskFields) -> ClientResult<Task> {
        let (list_id, _) = self.open_list()?;
        if fields.title.trim().is_empty() {
            return Err(ClientError::Validation("Task title is required".to_string()));
        }

        let selected = lock(&self.state).selected.as_ref().map(|t| t.id);
        let task = match selected {
            Some(task_id) => self.api.update_task(list_id, task_id, fields).await?,
            None => self.api.create_task(list_id, fields).await?,
        };
        lock(&self.state).selected = None;
        if let Err(e) = self.fetch_all().await {
            warn!("Tasks of list {list_id} not refreshed: {e}");
        }
        Ok(task)
    }

    /// Optimistic status change. The pending state is recorded before the
    /// returned future is first polled. On error the row is back at its old
    /// status and the error is returned so the caller can report it.
    pub fn set_status(
        &self,
        task_id: u64,
        status: TaskStatus,
    ) -> impl Future<Output = ClientResult<ToggleState>> + 'static {
        let started = self.begin_toggle(task_id, status);
        let this = self.clone();
        async move {
            let (list_id, generation, seq) = started?;
            this.finish_toggle(list_id, generation, task_id, seq, status).await
        }
    }

    fn begin_toggle(&self, task_id: u64, status: TaskStatus) -> ClientResult<(u64, u64, u64)> {
        let (list_id, generation) = self.open_list()?;
        let mut state = lock(&self.state);
        let previous = state
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.status)
            .ok_or(ClientError::NoSelection("task"))?;
        state.toggles.insert(task_id, ToggleState::Pending { previous, requested: status });
        state.toggle_seq += 1;
        let seq = state.toggle_seq;
        state.toggle_seqs.insert(task_id, seq);
        Ok((list_id, generation, seq))
    }

    async fn finish_toggle(
        &self,
        list_id: u64,
        generation: u64,
        task_id: u64,
        seq: u64,
        status: TaskStatus,
    ) -> ClientResult<ToggleState> {
        let result = self.api.update_task_status(list_id, task_id, status).await;

        let mut state = lock(&self.state);
        let still_on = state.still_on(list_id, generation);
        // A newer toggle of the same task keeps its own pending state
        let latest = still_on && state.toggle_seqs.get(&task_id) == Some(&seq);
        match result {
            Ok(updated) => {
                if still_on {
                    if let Some(task) = state.tasks.iter_mut().find(|t| t.id == task_id) {
                        *task = updated.clone();
                    }
                }
                if latest {
                    state.toggles.insert(task_id, ToggleState::Confirmed);
                    if matches!(state.filter, TaskStatusFilter::Only(s) if s != updated.status) {
                        state.tasks.retain(|t| t.id != task_id);
                        state.toggles.remove(&task_id);
                        state.toggle_seqs.remove(&task_id);
                    }
                }
                Ok(ToggleState::Confirmed)
            }
            Err(e) => {
                if latest {
                    state.toggles.insert(task_id, ToggleState::Reverted);
                }
                Err(e)
            }
        }
    }

    /// Delete one task after confirmation. `Ok(false)` when declined.
    pub async fn delete(&self, task_id: u64, confirm: &dyn Confirm) -> ClientResult<bool> {
        let (list_id, generation) = self.open_list()?;
        if !confirm.confirm("Are you sure you want to delete this task?") {
            return Ok(false);
        }

        self.api.delete_task(list_id, task_id).await?;
        let mut state = lock(&self.state);
        if state.still_on(list_id, generation) {
            state.tasks.retain(|t| t.id != task_id);
            state.toggles.remove(&task_id);
            state.toggle_seqs.remove(&task_id);
            if state.selected.as_ref().is_some_and(|t| t.id == task_id) {
                state.selected = None;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::test_support::client_with_token;
    use crate::models::TaskPriority;
    use crate::transport::Method;

    async fn with_tasks() -> (TasksController, std::sync::Arc<crate::transport::mock::MockTransport>) {
        let (api, mock) = client_with_token();
        mock.on(
            Method::Get,
            "/api/todo-lists/7/tasks",
            200,
            json!({"content": [
                {"id": 1, "title": "milk", "status": "PENDING", "priority": "LOW"},
                {"id": 2, "title": "eggs", "status": "COMPLETED", "priority": "HIGH"}
            ]}),
        );
        let tasks = TasksController::new(api);
        tasks.open(7);
        tasks.fetch_all().await.unwrap();
        (tasks, mock)
    }

    #[tokio::test]
    async fn test_fetch_requires_open_list() {
        let (api, mock) = client_with_token();
        let tasks = TasksController::new(api);

        assert_eq!(tasks.fetch_all().await.unwrap_err(), ClientError::NoSelection("todo list"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_toggle_reverts() {
        let (tasks, mock) = with_tasks().await;
        mock.on(Method::Patch, "/api/todo-lists/7/tasks/1/status", 500, json!({}));

        let err = tasks.set_status(1, TaskStatus::Completed).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update task status");
        assert_eq!(tasks.toggle_state(1), Some(ToggleState::Reverted));

        let task = tasks.tasks().into_iter().find(|t| t.id == 1).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(tasks.displayed_status(&task), TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_confirmed_toggle_takes_server_status() {
        let (tasks, mock) = with_tasks().await;
        mock.on(
            Method::Patch,
            "/api/todo-lists/7/tasks/1/status",
            200,
            json!({"id": 1, "title": "milk", "status": "COMPLETED", "priority": "LOW"}),
        );

        assert_eq!(tasks.set_status(1, TaskStatus::Completed).await.unwrap(), ToggleState::Confirmed);
        let task = tasks.tasks().into_iter().find(|t| t.id == 1).unwrap();
        assert!(task.status.is_completed());
        assert!(tasks.displayed_status(&task).is_completed());
    }

    #[tokio::test]
    async fn test_pending_toggle_shows_requested_status() {
        let (tasks, mock) = with_tasks().await;
        mock.on(Method::Patch, "/api/todo-lists/7/tasks/2/status", 500, json!({}));

        let toggle = tasks.set_status(2, TaskStatus::Pending);
        let task = tasks.tasks().into_iter().find(|t| t.id == 2).unwrap();
        assert_eq!(tasks.displayed_status(&task), TaskStatus::Pending);
        assert_eq!(
            tasks.toggle_state(2),
            Some(ToggleState::Pending { previous: TaskStatus::Completed, requested: TaskStatus::Pending })
        );

        assert!(toggle.await.is_err());
        let task = tasks.tasks().into_iter().find(|t| t.id == 2).unwrap();
        assert!(tasks.displayed_status(&task).is_completed());
    }

    #[tokio::test]
    async fn test_older_reply_keeps_newer_toggle_pending() {
        let (tasks, mock) = with_tasks().await;
        mock.on(
            Method::Patch,
            "/api/todo-lists/7/tasks/1/status",
            200,
            json!({"id": 1, "title": "milk", "status": "COMPLETED", "priority": "LOW"}),
        );
        mock.on(
            Method::Patch,
            "/api/todo-lists/7/tasks/1/status",
            200,
            json!({"id": 1, "title": "milk", "status": "PENDING", "priority": "LOW"}),
        );

        let check = tasks.set_status(1, TaskStatus::Completed);
        let uncheck = tasks.set_status(1, TaskStatus::Pending);
        assert_eq!(check.await.unwrap(), ToggleState::Confirmed);

        let task = tasks.tasks().into_iter().find(|t| t.id == 1).unwrap();
        assert_eq!(tasks.displayed_status(&task), TaskStatus::Pending);
        assert!(matches!(tasks.toggle_state(1), Some(ToggleState::Pending { requested: TaskStatus::Pending, .. })));

        assert_eq!(uncheck.await.unwrap(), ToggleState::Confirmed);
        let task = tasks.tasks().into_iter().find(|t| t.id == 1).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(tasks.toggle_state(1), Some(ToggleState::Confirmed));
    }

    #[tokio::test]
    async fn test_completed_task_leaves_pending_tab() {
        let (tasks, mock) = with_tasks().await;
        mock.on(
            Method::Get,
            "/api/todo-lists/7/tasks/status/PENDING",
            200,
            json!({"content": [{"id": 1, "title": "milk", "status": "PENDING", "priority": "LOW"}]}),
        );
        mock.on(
            Method::Patch,
            "/api/todo-lists/7/tasks/1/status",
            200,
            json!({"id": 1, "title": "milk", "status": "COMPLETED", "priority": "LOW"}),
        );
        tasks.filter_by_status(TaskStatusFilter::Only(TaskStatus::Pending)).await.unwrap();

        assert_eq!(tasks.set_status(1, TaskStatus::Completed).await.unwrap(), ToggleState::Confirmed);
        assert!(tasks.tasks().is_empty());
        assert_eq!(tasks.toggle_state(1), None);
    }

    #[tokio::test]
    async fn test_toggle_unknown_task() {
        let (tasks, mock) = with_tasks().await;
        let before = mock.request_count();

        let err = tasks.set_status(99, TaskStatus::Completed).await.unwrap_err();
        assert_eq!(err, ClientError::NoSelection("task"));
        assert_eq!(mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_create_task() {
        let (tasks, mock) = with_tasks().await;
        mock.on(Method::Post, "/api/todo-lists/7/tasks", 201, json!({"id": 3, "title": "bread"}));
        mock.on(Method::Get, "/api/todo-lists/7/tasks", 200, json!({"content": [{"id": 3, "title": "bread"}]}));

        tasks.save(&TaskFields::new("bread", TaskPriority::High)).await.unwrap();
        assert_eq!(tasks.tasks().len(), 1);
        let post = mock.requests().into_iter().find(|r| r.method == Method::Post).unwrap();
        assert_eq!(post.body.unwrap()["priority"], "HIGH");
    }

    #[tokio::test]
    async fn test_blank_task_title_sends_nothing() {
        let (tasks, mock) = with_tasks().await;
        let before = mock.request_count();

        let err = tasks.save(&TaskFields::new(" ", TaskPriority::Medium)).await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Task title is required".to_string()));
        assert_eq!(mock.request_count(), before);
    }

    #[tokio::test]
    async fn test_update_selected_task() {
        let (tasks, mock) = with_tasks().await;
        mock.on(Method::Get, "/api/todo-lists/7/tasks/1", 200, json!({"id": 1, "title": "milk", "priority": "LOW"}));
        mock.on(Method::Put, "/api/todo-lists/7/tasks/1", 200, json!({"id": 1, "title": "oat milk", "priority": "LOW"}));
        mock.on(
            Method::Get,
            "/api/todo-lists/7/tasks",
            200,
            json!({"content": [{"id": 1, "title": "oat milk", "priority": "LOW"}]}),
        );

        tasks.select(1).await.unwrap();
        let saved = tasks.save(&TaskFields::new("oat milk", TaskPriority::Low)).await.unwrap();
        assert_eq!(saved.title, "oat milk");
        assert!(tasks.selected().is_none());
        assert_eq!(tasks.tasks()[0].title, "oat milk");
    }

    #[tokio::test]
    async fn test_created_task_survives_failed_refresh() {
        let (tasks, mock) = with_tasks().await;
        mock.on(Method::Post, "/api/todo-lists/7/tasks", 201, json!({"id": 3, "title": "bread"}));
        mock.on(Method::Get, "/api/todo-lists/7/tasks", 500, json!({}));

        let saved = tasks.save(&TaskFields::new("bread", TaskPriority::Medium)).await.unwrap();
        assert_eq!(saved.id, 3);
        let posts = mock.requests().into_iter().filter(|r| r.method == Method::Post).count();
        assert_eq!(posts, 1);
        // The old rows stay until the next successful fetch
        assert_eq!(tasks.tasks().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (tasks, mock) = with_tasks().await;
        mock.on_raw(Method::Delete, "/api/todo-lists/7/tasks/1", 204, "");

        assert!(tasks.delete(1, &|_: &str| true).await.unwrap());
        assert_eq!(tasks.tasks().iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn test_tasks_of_abandoned_list_are_dropped() {
        let (api, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists/7/tasks", 200, json!({"content": [{"id": 1, "title": "milk"}]}));
        mock.set_delay(3);
        let tasks = TasksController::new(api);
        tasks.open(7);

        let fetch = tasks.fetch_all();
        let switch = async {
            tokio::task::yield_now().await;
            tasks.open(8);
        };
        let (result, ()) = tokio::join!(fetch, switch);

        assert!(result.is_ok());
        assert_eq!(tasks.list_id(), Some(8));
        assert!(tasks.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_status_filter() {
        let (tasks, mock) = with_tasks().await;
        mock.on(
            Method::Get,
            "/api/todo-lists/7/tasks/status/COMPLETED",
            200,
            json!({"content": [{"id": 2, "title": "eggs", "status": "COMPLETED"}]}),
        );

        let count = tasks.filter_by_status(TaskStatusFilter::Only(TaskStatus::Completed)).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(tasks.filter(), TaskStatusFilter::Only(TaskStatus::Completed));
    }
}
