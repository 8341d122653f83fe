//! Task Endpoints
//!
//! Tasks live under their todo list: `/api/todo-lists/{listId}/tasks`.

use super::ApiClient;
use crate::error::ClientResult;
use crate::models::{StatusPatch, Task, TaskFields, TaskStatus};
use crate::transport::Method;

fn tasks_path(list_id: u64) -> String {
    format!("/api/todo-lists/{list_id}/tasks")
}

impl ApiClient {
    pub async fn list_tasks(&self, list_id: u64) -> ClientResult<Vec<Task>> {
        self.fetch_page(&tasks_path(list_id), "fetch tasks").await
    }

    pub async fn tasks_by_status(&self, list_id: u64, status: TaskStatus) -> ClientResult<Vec<Task>> {
        let path = format!("{}/status/{}", tasks_path(list_id), status.as_str());
        self.fetch_page(&path, "fetch tasks").await
    }

    pub async fn get_task(&self, list_id: u64, task_id: u64) -> ClientResult<Task> {
        let path = format!("{}/{task_id}", tasks_path(list_id));
        self.request::<_, ()>(Method::Get, &path, None, "fetch task").await
    }

    pub async fn create_task(&self, list_id: u64, fields: &TaskFields) -> ClientResult<Task> {
        self.request(Method::Post, &tasks_path(list_id), Some(fields), "add task")
            .await
    }

    pub async fn update_task(&self, list_id: u64, task_id: u64, fields: &TaskFields) -> ClientResult<Task> {
        let path = format!("{}/{task_id}", tasks_path(list_id));
        self.request(Method::Put, &path, Some(fields), "update task").await
    }

    pub async fn delete_task(&self, list_id: u64, task_id: u64) -> ClientResult<()> {
        let path = format!("{}/{task_id}", tasks_path(list_id));
        self.request_raw::<()>(Method::Delete, &path, None, "delete task").await?;
        Ok(())
    }

    /// `PATCH .../tasks/{taskId}/status` with `{"status": ...}`
    pub async fn update_task_status(&self, list_id: u64, task_id: u64, status: TaskStatus) -> ClientResult<Task> {
        let path = format!("{}/{task_id}/status", tasks_path(list_id));
        self.request(Method::Patch, &path, Some(&StatusPatch { status }), "update task status")
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::test_support::client_with_token;
    use crate::error::ClientError;
    use crate::models::{TaskFields, TaskPriority, TaskStatus};
    use crate::transport::Method;

    #[tokio::test]
    async fn test_create_task_defaults() {
        let (client, mock) = client_with_token();
        mock.on(Method::Post, "/api/todo-lists/7/tasks", 201, json!({"id": 1, "title": "milk"}));

        client.create_task(7, &TaskFields::new("milk", TaskPriority::Medium)).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            Some(json!({"title": "milk", "status": "PENDING", "priority": "MEDIUM"}))
        );
    }

    #[tokio::test]
    async fn test_status_patch_path_and_body() {
        let (client, mock) = client_with_token();
        mock.on(
            Method::Patch,
            "/api/todo-lists/7/tasks/1/status",
            200,
            json!({"id": 1, "title": "milk", "status": "COMPLETED"}),
        );

        let task = client.update_task_status(7, 1, TaskStatus::Completed).await.unwrap();
        assert!(task.status.is_completed());
        assert_eq!(mock.last_request().unwrap().body, Some(json!({"status": "COMPLETED"})));
    }

    #[tokio::test]
    async fn test_tasks_by_status_path() {
        let (client, mock) = client_with_token();
        mock.on(Method::Get, "/api/todo-lists/7/tasks/status/PENDING", 200, json!({"content": []}));

        client.tasks_by_status(7, TaskStatus::Pending).await.unwrap();
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_task_failure() {
        let (client, mock) = client_with_token();
        mock.on(Method::Delete, "/api/todo-lists/7/tasks/1", 403, json!({}));

        let err = client.delete_task(7, 1).await.unwrap_err();
        assert_eq!(err, ClientError::request_failed("delete task", 403));
    }
}
