//! Shared HTTP client core.
//!
//! One `ApiClient` per suite run owns the transport and a read-only
//! [`RequestTemplate`]; every call derives a fresh per-call builder from the
//! template, so no header or auth state leaks between tests. All round trips
//! are synchronous.

use crate::config::Settings;
use crate::error::ApiError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fixed identifying user agent sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("bookcheck/", env!("CARGO_PKG_VERSION"));

/// Read-only descriptor every per-call request is derived from.
///
/// Built once from [`Settings`] and rebuilt only through
/// [`ApiClient::reset`]; never partially mutated.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    base_path: String,
    headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    log_requests: bool,
}

impl RequestTemplate {
    /// Build the template from current settings.
    ///
    /// Fails if no base URL is configured — the suite has no target.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        if settings.base_url.trim().is_empty() {
            return Err(ApiError::Config(
                "base.url is empty; no target endpoint".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        Ok(Self {
            base_path: settings.api_base_path(),
            headers,
            timeout: Duration::from_secs(settings.timeout),
            connect_timeout: Duration::from_secs(settings.connection_timeout),
            log_requests: settings.log_requests,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Captured result of a single call: status, timing, and the raw body with
/// typed-decode capability. Scoped to one call, never cached.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub elapsed: Duration,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body into `T`. A shape mismatch is an error the caller
    /// sees, never a silent default.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode {
            context: std::any::type_name::<T>()
                .rsplit("::")
                .next()
                .unwrap_or("value")
                .to_string(),
            message: e.to_string(),
        })
    }
}

/// The shared client core: transport plus request template.
///
/// Safe for concurrent read access; `reset` takes `&mut self`, so a rebuild
/// cannot race in-flight requests from other borrows.
#[derive(Debug)]
pub struct ApiClient {
    settings: Settings,
    template: RequestTemplate,
    client: Client,
}

impl ApiClient {
    /// Initialize the client core from settings.
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let template = RequestTemplate::from_settings(settings)?;
        let client = build_transport(&template)?;
        info!(base_path = %template.base_path(), "API client initialized");
        Ok(Self {
            settings: settings.clone(),
            template,
            client,
        })
    }

    /// A fresh per-call request builder seeded from the shared template.
    ///
    /// Callers mutate only the returned builder (body, path params, per-call
    /// `bearer_auth`), never the template itself.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.template.base_path, path);
        self.client
            .request(method, url)
            .headers(self.template.headers.clone())
    }

    /// Execute a request, measuring elapsed time and capturing the body.
    ///
    /// Transport failures surface as [`ApiError::Transport`]; there is no
    /// retry at this layer.
    pub fn execute(&self, builder: RequestBuilder) -> Result<ApiResponse, ApiError> {
        let request = builder.build().map_err(ApiError::Transport)?;
        if self.template.log_requests {
            debug!(method = %request.method(), url = %request.url(), "--> request");
        }

        let started = Instant::now();
        let response = self.client.execute(request).map_err(ApiError::Transport)?;
        let elapsed = started.elapsed();

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(ApiError::Transport)?;

        if self.template.log_requests {
            debug!(
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis() as u64,
                body_bytes = body.len(),
                "<-- response"
            );
        }

        Ok(ApiResponse {
            status,
            elapsed,
            content_type,
            body,
        })
    }

    /// Convenience: build and execute in one step.
    pub fn call(&self, method: Method, path: &str) -> Result<ApiResponse, ApiError> {
        self.execute(self.request(method, path))
    }

    /// Discard transport-level state and rebuild the template from the
    /// retained settings. Used in per-test setup to guarantee a clean slate.
    pub fn reset(&mut self) -> Result<(), ApiError> {
        self.template = RequestTemplate::from_settings(&self.settings)?;
        self.client = build_transport(&self.template)?;
        debug!("API client reset completed");
        Ok(())
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn base_path(&self) -> &str {
        self.template.base_path()
    }
}

fn build_transport(template: &RequestTemplate) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(template.timeout())
        .connect_timeout(template.connect_timeout())
        .build()
        .map_err(ApiError::Transport)
}
