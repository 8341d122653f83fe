//! Client Configuration
//!
//! Values come from a `<meta>` tag in the host page, then a compile-time
//! environment variable, then the built-in default.

use log::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_KEY: &str = "authToken";
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme + host + port, no trailing slash
    pub api_base_url: String,
    /// localStorage key holding the bearer token
    pub token_storage_key: String,
    pub notice_duration_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_KEY.to_string(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        Self::resolve(meta_content)
    }

    /// Resolve every value through `lookup_meta`, falling back to build-time env and defaults
    pub fn resolve(lookup_meta: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = try_load(
            "api-base-url",
            lookup_meta("api-base-url"),
            option_env!("NOTES_API_BASE_URL"),
            DEFAULT_API_BASE_URL,
        );
        let token_storage_key = try_load(
            "token-storage-key",
            lookup_meta("token-storage-key"),
            option_env!("NOTES_TOKEN_KEY"),
            DEFAULT_TOKEN_KEY,
        );
        let notice_duration_ms = lookup_meta("notice-duration-ms")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_NOTICE_DURATION_MS);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token_storage_key,
            notice_duration_ms,
        }
    }
}

fn try_load(key: &str, from_page: Option<String>, from_build: Option<&str>, default: &str) -> String {
    if let Some(value) = from_page.filter(|v| !v.trim().is_empty()) {
        debug!("{key} taken from page meta: {value}");
        return value.trim().to_string();
    }
    if let Some(value) = from_build.filter(|v| !v.trim().is_empty()) {
        debug!("{key} taken from build environment: {value}");
        return value.trim().to_string();
    }
    info!("{key} not set, using default: {default}");
    default.to_string()
}

/// Read `<meta name="..." content="...">` from the current document
fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()?;
    element.get_attribute("content")
}
