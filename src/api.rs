//! Client for the queue-entry REST resource.
//!
//! Submit methods never return transport errors to the caller as
//! [`CareQueueError`]; they map everything into [`SubmitError`] so the confirm
//! flow can report it.
//!
//! # Security Note - Logging
//!
//! Credentials are kept in a `SecretString` and only exposed while building the
//! basic-auth header. Do not enable `CAREQUEUE_LOG=reqwest=trace` against a
//! production server; request logging at that level includes headers.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::config::{Config, Credentials};
use crate::confirm::{ActionOutcome, SubmitAction, SubmitError};
use crate::error::{CareQueueError, Result};
use crate::store::QueueSource;
use crate::types::{QueueActionKind, QueueEntry, ResultsPage};

const REST_PATH: &str = "ws/rest/v1/";

/// Upper bound on pages followed by one listing
const MAX_PAGES: usize = 200;

/// Error payload the server attaches to failed requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

pub struct QueueClient {
    client: Client,
    rest_base: Url,
    credentials: Option<Credentials>,
}

impl QueueClient {
    /// Create a client from configuration
    ///
    /// Configures HTTP client with 30s connect timeout and 60s total timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url()?, config.credentials())
    }

    pub fn new(base_url: Url, credentials: Option<Credentials>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            rest_base: rest_root(base_url)?,
            credentials,
        })
    }

    /// Root of the REST API, always ending in `/`
    pub fn rest_base(&self) -> &Url {
        &self.rest_base
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, url::ParseError> {
        self.rest_base.join(path)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some(creds) => {
                builder.basic_auth(&creds.username, Some(creds.password.expose_secret()))
            }
            None => builder,
        }
    }

    /// Active (not ended) queue entries, following `next` links across pages
    pub async fn list_active(&self) -> Result<Vec<QueueEntry>> {
        let mut url = self.endpoint("queue-entry?v=default&isEnded=false")?;
        let mut entries = Vec::new();

        for _ in 0..MAX_PAGES {
            tracing::debug!(%url, "listing queue entries");
            let response = self.request(Method::GET, url).send().await?;
            let page: ResultsPage<QueueEntry> = api_response(response).await?.json().await?;
            let next = page.next_page().map(Url::parse).transpose()?;
            entries.extend(page.results);

            match next {
                Some(next) => url = next,
                None => return Ok(entries),
            }
        }

        tracing::warn!(pages = MAX_PAGES, "queue entry listing truncated");
        Ok(entries)
    }

    /// A single entry by uuid, ended or not
    pub async fn get_entry(&self, uuid: &str) -> Result<QueueEntry> {
        let mut url = self.entry_url(uuid)?;
        url.set_query(Some("v=default"));
        tracing::debug!(%url, "fetching queue entry");

        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CareQueueError::EntryNotFound(uuid.to_string()));
        }
        Ok(api_response(response).await?.json().await?)
    }

    /// Delete the entry
    pub async fn void_entry(
        &self,
        entry: &QueueEntry,
    ) -> std::result::Result<ActionOutcome, SubmitError> {
        let url = self.entry_url(&entry.uuid).map_err(rejected)?;
        let response = self.request(Method::DELETE, url).send().await?;
        outcome(response).await
    }

    /// Mark the entry as ended now
    pub async fn end_entry(
        &self,
        entry: &QueueEntry,
    ) -> std::result::Result<ActionOutcome, SubmitError> {
        let url = self.entry_url(&entry.uuid).map_err(rejected)?;
        let body = json!({ "endedAt": format_timestamp(jiff::Timestamp::now()) });
        let response = self.request(Method::POST, url).json(&body).send().await?;
        outcome(response).await
    }

    /// Revert the entry's last transition
    pub async fn undo_transition(
        &self,
        entry: &QueueEntry,
    ) -> std::result::Result<ActionOutcome, SubmitError> {
        let url = self
            .endpoint("queue-entry/transition/undo")
            .map_err(rejected)?;
        let body = json!({ "queueEntry": entry.uuid });
        let response = self.request(Method::POST, url).json(&body).send().await?;
        outcome(response).await
    }

    /// Submit action running `kind` through this client
    pub fn action(&self, kind: QueueActionKind) -> QueueAction<'_> {
        QueueAction { client: self, kind }
    }

    fn entry_url(&self, uuid: &str) -> Result<Url> {
        let mut url = self.endpoint("queue-entry/")?;
        url.path_segments_mut()
            .map_err(|_| CareQueueError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(uuid);
        Ok(url)
    }
}

impl QueueSource for QueueClient {
    async fn fetch_entries(&self) -> Result<Vec<QueueEntry>> {
        self.list_active().await
    }

    async fn fetch_entry(&self, uuid: &str) -> Result<QueueEntry> {
        self.get_entry(uuid).await
    }
}

/// One of the standard queue actions bound to a client
#[derive(Clone, Copy)]
pub struct QueueAction<'c> {
    client: &'c QueueClient,
    kind: QueueActionKind,
}

impl QueueAction<'_> {
    pub fn kind(&self) -> QueueActionKind {
        self.kind
    }
}

impl SubmitAction for QueueAction<'_> {
    async fn submit(&self, entry: &QueueEntry) -> std::result::Result<ActionOutcome, SubmitError> {
        tracing::debug!(kind = %self.kind, entry = %entry.uuid, "submitting");
        match self.kind {
            QueueActionKind::Void => self.client.void_entry(entry).await,
            QueueActionKind::End => self.client.end_entry(entry).await,
            QueueActionKind::UndoTransition => self.client.undo_transition(entry).await,
        }
    }
}

fn rest_root(mut base_url: Url) -> Result<Url> {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    Ok(base_url.join(REST_PATH)?)
}

fn rejected(error: impl std::fmt::Display) -> SubmitError {
    SubmitError::rejected(error.to_string())
}

/// Millisecond-precision UTC timestamp, the form the server's date parser expects
fn format_timestamp(timestamp: jiff::Timestamp) -> String {
    timestamp.strftime("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Pass successful responses through; anything else becomes [`CareQueueError::Api`]
async fn api_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response)
        .await
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(CareQueueError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Map a response to an outcome.
///
/// Failed responses carrying the server's error payload are rejections with
/// that message; anything else resolves with its status and is judged by the
/// flow.
async fn outcome(response: Response) -> std::result::Result<ActionOutcome, SubmitError> {
    let status = response.status();
    if status.is_success() {
        return Ok(ActionOutcome::new(status.as_u16()));
    }

    match error_message(response).await {
        Some(message) => Err(SubmitError::rejected(message)),
        None => Ok(ActionOutcome::new(status.as_u16())
            .with_message(status.canonical_reason().map(str::to_string))),
    }
}

async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.is_empty())
}
