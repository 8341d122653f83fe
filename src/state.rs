//! Application State
//!
//! Everything one signed-in page needs, built once at startup. Operations
//! here are what the components call; each one turns a failure into a
//! notice instead of returning it.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::controllers::{
    Confirm, NotesController, Outcome, TaskStatusFilter, TasksController, TodoListsController,
};
use crate::error::{ClientError, ClientResult};
use crate::models::{SignupRequest, Tag, TaskFields, TaskPriority, TaskStatus};
use crate::session::SessionStore;
use crate::storage::TokenStorage;
use crate::transport::HttpTransport;
use crate::view::{NoteForm, TodoListForm};

/// Transient message for the toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
    /// Increases with every notice so a toast only hides its own message
    pub seq: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub session: SessionStore,
    pub notes: NotesController,
    pub todo_lists: TodoListsController,
    pub tasks: TasksController,
    api: ApiClient,
    tags: Arc<Mutex<Vec<Tag>>>,
    notice: Arc<Mutex<Option<Notice>>>,
    notice_seq: Arc<AtomicU64>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>, storage: Arc<dyn TokenStorage>) -> Self {
        let api = ApiClient::new(&config.api_base_url, transport);
        Self {
            session: SessionStore::new(api.clone(), storage, &config.token_storage_key),
            notes: NotesController::new(api.clone()),
            todo_lists: TodoListsController::new(api.clone()),
            tasks: TasksController::new(api.clone()),
            config: Arc::new(config),
            api,
            tags: Arc::default(),
            notice: Arc::default(),
            notice_seq: Arc::default(),
        }
    }

    // ========================
    // Notices
    // ========================

    pub fn notice(&self) -> Option<Notice> {
        lock(&self.notice).clone()
    }

    fn notify(&self, message: impl Into<String>, is_error: bool) {
        let seq = self.notice_seq.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.notice) = Some(Notice { message: message.into(), is_error, seq });
    }

    /// Hide the notice, unless a newer one replaced it
    pub fn dismiss_notice(&self, seq: u64) {
        let mut notice = lock(&self.notice);
        if notice.as_ref().is_some_and(|n| n.seq == seq) {
            *notice = None;
        }
    }

    /// Unwrap a result, reporting the error as a notice
    fn report<T>(&self, result: ClientResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{e}");
                self.notify(e.to_string(), true);
                None
            }
        }
    }

    // ========================
    // Session
    // ========================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn welcome(&self) -> String {
        match self.session.user() {
            Some(user) => format!("Welcome, {}", user.display_name()),
            None => "Welcome".to_string(),
        }
    }

    /// Restore a persisted session and load the collections.
    /// Returns whether the user is signed in.
    pub async fn start(&self) -> bool {
        if self.session.restore().is_none() {
            return false;
        }
        match self.session.load_current_user().await {
            Ok(user) => info!("Session restored for {}", user.username),
            Err(e) if e.is_unauthorized() => {
                warn!("Persisted token rejected");
                self.teardown();
                return false;
            }
            Err(e) => {
                self.report::<()>(Err(e));
            }
        }
        self.load_collections().await;
        true
    }

    pub async fn login(&self, username: &str, password: &str) -> bool {
        if self.report(self.session.login(username, password).await).is_none() {
            return false;
        }
        self.notify("Login successful!", false);
        self.load_collections().await;
        true
    }

    pub async fn register(&self, request: &SignupRequest) -> bool {
        if self.report(self.session.register(request).await).is_none() {
            return false;
        }
        self.notify("Registration successful! Please login.", false);
        true
    }

    pub fn logout(&self) {
        self.teardown();
        self.notify("Logged out successfully", false);
    }

    /// Forget the session and everything loaded under it
    fn teardown(&self) {
        self.session.logout();
        self.notes.reset();
        self.todo_lists.reset();
        self.tasks.close();
        lock(&self.tags).clear();
    }

    async fn load_collections(&self) {
        self.report(self.notes.fetch_all().await);
        self.report(self.todo_lists.fetch_all().await);
        self.load_tags().await;
    }

    // ========================
    // Notes
    // ========================

    pub fn tags(&self) -> Vec<Tag> {
        lock(&self.tags).clone()
    }

    pub async fn load_tags(&self) {
        match self.api.list_tags().await {
            Ok(tags) => *lock(&self.tags) = tags,
            Err(e) => warn!("Tags not loaded: {e}"),
        }
    }

    pub fn close_note(&self) {
        self.notes.close();
    }

    pub fn new_note(&self) {
        self.close_todo_list();
        self.notes.create_new();
    }

    /// Open a note; the todo-list pane closes right away
    pub fn select_note(&self, id: u64) -> impl Future<Output = bool> + 'static {
        self.close_todo_list();
        let pending = self.notes.select(id);
        let this = self.clone();
        async move { matches!(this.report(pending.await), Some(Outcome::Applied(_))) }
    }

    pub async fn save_note(&self, form: &NoteForm) -> bool {
        if self.report(self.notes.save(&form.to_fields()).await).is_none() {
            return false;
        }
        self.notify("Note saved successfully", false);
        self.load_tags().await;
        true
    }

    pub async fn delete_note(&self, confirm: &dyn Confirm) -> bool {
        match self.report(self.notes.delete(confirm).await) {
            Some(true) => {
                self.notify("Note deleted successfully", false);
                self.load_tags().await;
                true
            }
            _ => false,
        }
    }

    pub async fn search_notes(&self, query: &str) {
        self.report(self.notes.search(query).await);
    }

    pub async fn filter_notes_by_tag(&self, tag: &str) {
        self.report(self.notes.filter_by_tag(tag).await);
    }

    // ========================
    // Todo Lists
    // ========================

    pub fn close_todo_list(&self) {
        self.todo_lists.close();
        self.tasks.close();
    }

    pub fn new_todo_list(&self) {
        self.notes.close();
        self.tasks.close();
        self.todo_lists.create_new();
    }

    /// Open a todo list and its tasks; the note pane closes right away
    pub fn select_todo_list(&self, id: u64) -> impl Future<Output = bool> + 'static {
        self.notes.close();
        self.tasks.close();
        let pending = self.todo_lists.select(id);
        let this = self.clone();
        async move {
            match this.report(pending.await) {
                Some(Outcome::Applied(_)) => {
                    this.open_tasks(id).await;
                    true
                }
                _ => false,
            }
        }
    }

    async fn open_tasks(&self, list_id: u64) {
        self.tasks.open(list_id);
        self.report(self.tasks.fetch_all().await);
    }

    pub async fn save_todo_list(&self, form: &TodoListForm) -> bool {
        let Some(outcome) = self.report(self.todo_lists.save(&form.to_fields()).await) else {
            return false;
        };
        self.notify("Todo list saved successfully", false);
        // A newly created list gets its (empty) task list
        if let Outcome::Applied(list) = outcome {
            if list.id.is_some() && list.id != self.tasks.list_id() {
                if let Some(id) = self.todo_lists.current_id() {
                    self.open_tasks(id).await;
                }
            }
        }
        true
    }

    pub async fn delete_todo_list(&self, confirm: &dyn Confirm) -> bool {
        match self.report(self.todo_lists.delete(confirm).await) {
            Some(true) => {
                self.tasks.close();
                self.notify("Todo list deleted successfully", false);
                true
            }
            _ => false,
        }
    }

    pub async fn search_todo_lists(&self, query: &str) {
        self.report(self.todo_lists.search(query).await);
    }

    // ========================
    // Tasks
    // ========================

    /// Add a task, or update the one loaded for editing
    pub async fn save_task(&self, title: &str, priority: TaskPriority) -> bool {
        let mut fields = TaskFields::new(title.trim(), priority);
        if let Some(selected) = self.tasks.selected() {
            fields.status = selected.status;
            fields.description = selected.description;
            fields.due_date = selected.due_date;
        }
        self.report(self.tasks.save(&fields).await).is_some()
    }

    pub async fn edit_task(&self, task_id: u64) -> bool {
        self.report(self.tasks.select(task_id).await).is_some()
    }

    pub fn cancel_task_edit(&self) {
        self.tasks.clear_selection();
    }

    /// Checkbox change. The row shows the new state until the server answers.
    pub fn toggle_task(&self, task_id: u64, checked: bool) -> impl Future<Output = bool> + 'static {
        let pending = self.tasks.set_status(task_id, TaskStatus::from_checked(checked));
        let this = self.clone();
        async move { this.report(pending.await).is_some() }
    }

    pub async fn delete_task(&self, task_id: u64, confirm: &dyn Confirm) -> bool {
        matches!(self.report(self.tasks.delete(task_id, confirm).await), Some(true))
    }

    pub async fn filter_tasks(&self, filter: TaskStatusFilter) {
        self.report(self.tasks.filter_by_status(filter).await);
    }

    /// Report an error raised outside any operation (e.g. a form check)
    pub fn report_error(&self, error: ClientError) {
        self.report::<()>(Err(error));
    }
}
