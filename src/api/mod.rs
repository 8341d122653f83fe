//! REST API Client
//!
//! Bindings to the notes/todo service, organized by resource group.

mod auth;
mod notes;
mod tasks;
mod todo_lists;

use std::sync::{Arc, Mutex, PoisonError};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::models::Page;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

/// Bearer token shared by every clone of the client
#[derive(Debug, Clone, Default)]
pub struct Credentials(Arc<Mutex<Option<String>>>);

impl Credentials {
    pub fn token(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
            credentials: Credentials::default(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request, attaching the bearer token unless `public`
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        public: bool,
    ) -> ClientResult<ApiResponse> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            bearer: if public { None } else { self.credentials.token() },
            body,
        };
        self.transport.send(request).await
    }

    /// Bearer request whose 2xx body is decoded into `T`
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>, action: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.request_raw(method, path, body, action).await?;
        decode(&response)
    }

    /// Bearer request whose body is ignored (DELETE, mostly)
    async fn request_raw<B>(&self, method: Method, path: &str, body: Option<&B>, action: &str) -> ClientResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let response = self.send(method, path, body, false).await?;
        ensure_success(response, action)
    }

    /// GET a paged list and unwrap its `content`
    async fn fetch_page<T: DeserializeOwned>(&self, path: &str, action: &str) -> ClientResult<Vec<T>> {
        let page: Page<T> = self.request::<_, ()>(Method::Get, path, None, action).await?;
        Ok(page.content)
    }
}

fn ensure_success(response: ApiResponse, action: &str) -> ClientResult<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        warn!("Failed to {action}: HTTP {}", response.status);
        Err(ClientError::request_failed(action, response.status))
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ClientResult<T> {
    Ok(serde_json::from_str(&response.body)?)
}

/// Percent-encode a value for use as a path segment or query value
fn encode(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}
