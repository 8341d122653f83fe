//! HTTP Transport
//!
//! The one seam between the API client and the network. The browser build
//! sends through reqwest (fetch underneath); tests script responses.

use async_trait::async_trait;
use log::debug;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token; `None` for the auth endpoints
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reports whatever status came back.
/// Only failures that produce no status at all are errors here.
#[async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        debug!("{} {}", request.method.as_str(), request.url);

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    //! Scripted transport for headless tests.

    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Mutex, PoisonError};
    use std::task::{Context, Poll};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{ApiRequest, ApiResponse, HttpTransport, Method};
    use crate::error::ClientError;

    struct Route {
        method: Method,
        path: String,
        response: Result<ApiResponse, ClientError>,
        sticky: bool,
    }

    /// Replays scripted responses by method + path and records every request.
    /// Unscripted requests get a 404.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<Vec<Route>>,
        requests: Mutex<Vec<ApiRequest>>,
        delay_polls: AtomicU32,
    }

    /// Returns `Pending` a fixed number of times before completing
    struct YieldTimes(u32);

    impl Future for YieldTimes {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 == 0 {
                return Poll::Ready(());
            }
            self.0 -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    /// Path part of a URL, starting at `/api/`
    pub fn path_of(url: &str) -> &str {
        url.find("/api/").map(|i| &url[i..]).unwrap_or(url)
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, method: Method, path: &str, response: Result<ApiResponse, ClientError>, sticky: bool) {
            self.routes.lock().unwrap_or_else(PoisonError::into_inner).push(Route {
                method,
                path: path.to_string(),
                response,
                sticky,
            });
        }

        /// Answer the next matching request once
        pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
            let response = ApiResponse { status, body: body.to_string() };
            self.push(method, path, Ok(response), false);
            self
        }

        /// Answer every matching request
        pub fn always(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
            let response = ApiResponse { status, body: body.to_string() };
            self.push(method, path, Ok(response), true);
            self
        }

        pub fn on_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
            let response = ApiResponse { status, body: body.to_string() };
            self.push(method, path, Ok(response), false);
            self
        }

        pub fn fail(&self, method: Method, path: &str, error: ClientError) -> &Self {
            self.push(method, path, Err(error), false);
            self
        }

        /// Keep every later response in flight for `polls` extra polls
        pub fn set_delay(&self, polls: u32) {
            self.delay_polls.store(polls, Ordering::SeqCst);
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        pub fn last_request(&self) -> Option<ApiRequest> {
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
        }

        /// (method, path) of every request so far
        pub fn calls(&self) -> Vec<(Method, String)> {
            self.requests()
                .iter()
                .map(|r| (r.method, path_of(&r.url).to_string()))
                .collect()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
            let path = path_of(&request.url).to_string();
            self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
            YieldTimes(self.delay_polls.load(Ordering::SeqCst)).await;

            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            let matches = |r: &Route| r.method == request.method && r.path == path;
            // One-shot answers take precedence over sticky ones
            let index = routes
                .iter()
                .position(|r| !r.sticky && matches(r))
                .or_else(|| routes.iter().position(|r| matches(r)));
            let Some(index) = index else {
                return Ok(ApiResponse { status: 404, body: String::new() });
            };
            if routes[index].sticky {
                routes[index].response.clone()
            } else {
                routes.remove(index).response
            }
        }
    }
}
