//! Todo-List Endpoints

use super::{encode, ApiClient};
use crate::error::ClientResult;
use crate::models::{TodoList, TodoListFields};
use crate::transport::Method;

impl ApiClient {
    pub async fn list_todo_lists(&self) -> ClientResult<Vec<TodoList>> {
        self.fetch_page("/api/todo-lists", "fetch todo lists").await
    }

    pub async fn get_todo_list(&self, id: u64) -> ClientResult<TodoList> {
        self.request::<_, ()>(Method::Get, &format!("/api/todo-lists/{id}"), None, "fetch todo list")
            .await
    }

    pub async fn create_todo_list(&self, fields: &TodoListFields) -> ClientResult<TodoList> {
        self.request(Method::Post, "/api/todo-lists", Some(fields), "save todo list")
            .await
    }

    pub async fn update_todo_list(&self, id: u64, fields: &TodoListFields) -> ClientResult<TodoList> {
        self.request(Method::Put, &format!("/api/todo-lists/{id}"), Some(fields), "save todo list")
            .await
    }

    pub async fn delete_todo_list(&self, id: u64) -> ClientResult<()> {
        self.request_raw::<()>(Method::Delete, &format!("/api/todo-lists/{id}"), None, "delete todo list")
            .await?;
        Ok(())
    }

    pub async fn search_todo_lists(&self, query: &str) -> ClientResult<Vec<TodoList>> {
        let path = format!("/api/todo-lists/search?query={}", encode(query));
        self.fetch_page(&path, "search todo lists").await
    }
}
