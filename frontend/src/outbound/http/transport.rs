//! Shared reqwest plumbing for the marketplace API adapters.
//!
//! This module owns transport details only: URL joining, the bearer
//! credential, status-to-error mapping and body decoding.

use std::sync::Arc;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::SessionContext;
use crate::domain::ports::ApiError;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("hostel-admin/", env!("CARGO_PKG_VERSION"));

/// Connection to the marketplace API, shared by every HTTP adapter.
#[derive(Clone)]
pub struct ApiTransport {
    client: Client,
    base: Url,
    user_agent: String,
    session: Arc<SessionContext>,
}

impl ApiTransport {
    /// Build a transport rooted at `base`.
    ///
    /// No client-side timeout is applied; a request lasts as long as the
    /// server keeps the connection open.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        user_agent: impl Into<String>,
        session: Arc<SessionContext>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
            user_agent: user_agent.into(),
            session,
        })
    }

    /// Root URL every path is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub(super) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.execute(Method::GET, path, |request| request).await?;
        decode(&body)
    }

    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(method, path, |request| request.json(payload))
            .await?;
        decode(&body)
    }

    /// Send `payload` and return the raw reply body, for callers that accept
    /// more than one reply shape.
    pub(super) async fn send_json_raw<B>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.execute(method, path, |request| request.json(payload))
            .await
    }

    pub(super) async fn post_ignoring_reply<B>(&self, path: &str, payload: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.execute(Method::POST, path, |request| request.json(payload))
            .await
            .map(drop)
    }

    pub(super) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, |request| request)
            .await
            .map(drop)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path)?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json");
        if let Some(token) = self.session.bearer_token() {
            request = request.bearer_auth(token.as_str());
        }

        let response = prepare(request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%method, path, status = status.as_u16(), bytes = body.len(), "api request");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::validation(format!("invalid request path {path}: {err}")))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

pub(super) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::decode(format!("{err}; body: {}", body_preview(body)))
    })
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::network(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::CONFLICT | StatusCode::GONE => ApiError::conflict(message),
        _ if status.is_client_error() => ApiError::validation(message),
        _ => ApiError::network(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
