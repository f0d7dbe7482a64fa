use gadget_shelf_catalog::Collection;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tokio::time::Duration;

use crate::config::SyncConfig;
use crate::document::{build_write_body, parse_document, parse_write_response};
use crate::error::SyncError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Read/write access to the remote document holding the catalog.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Read document `id` without credentials.
    ///
    /// `Ok(None)` means the document has no usable items; transport failures,
    /// non-2xx responses and undecodable payloads are errors.
    async fn fetch_document(&self, id: &str) -> Result<Option<Collection>, SyncError>;

    /// Create (`id` is `None`) or update document `id` with `collection`.
    /// Returns the effective document id.
    async fn push_document(
        &self,
        id: Option<&str>,
        collection: &Collection,
    ) -> Result<String, SyncError>;
}

/// HTTP client for a gist-style document store.
pub struct GistClient {
    http: reqwest::Client,
    api_url: String,
    file_name: String,
    description: String,
    token: Option<String>,
}

impl GistClient {
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        Self::with_builder(config, reqwest::Client::builder())
    }

    /// Build on top of a caller-supplied `reqwest` builder (proxy, TLS roots).
    pub fn with_builder(
        config: &SyncConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gadget-shelf/", env!("CARGO_PKG_VERSION"))),
        );

        let http = builder
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            file_name: config.file_name.clone(),
            description: config.description.clone(),
            token: config.token.clone(),
        })
    }

    pub fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.api_url, id)
    }

    fn auth_header(&self) -> Result<HeaderValue, SyncError> {
        let token = self.token.as_deref().ok_or_else(|| {
            SyncError::Config("A write token is required to push the document".to_string())
        })?;
        HeaderValue::from_str(&format!("token {token}"))
            .map_err(|e| SyncError::Config(format!("Invalid token: {e}")))
    }
}

impl DocumentStore for GistClient {
    async fn fetch_document(&self, id: &str) -> Result<Option<Collection>, SyncError> {
        let url = self.document_url(id);
        log::debug!("GET {}", url);

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: snippet(&text),
            });
        }

        let collection = parse_document(&text, &self.file_name)?;
        if let Some(ref c) = collection {
            log::debug!("Fetched {} items from document {}", c.len(), id);
        }
        Ok(collection)
    }

    async fn push_document(
        &self,
        id: Option<&str>,
        collection: &Collection,
    ) -> Result<String, SyncError> {
        let auth = self.auth_header()?;
        let last_updated =
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let body = build_write_body(collection, &self.file_name, &self.description, last_updated)?;

        let request = match id {
            Some(id) => self.http.patch(self.document_url(id)),
            None => self.http.post(&self.api_url),
        };
        log::debug!(
            "{} {} items to {}",
            if id.is_some() { "Updating" } else { "Creating" },
            collection.len(),
            id.unwrap_or("a new document"),
        );

        let resp = request
            .header(AUTHORIZATION, auth)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: snippet(&text),
            });
        }

        parse_write_response(&text)
    }
}

/// First 200 characters of a response body, for error messages.
fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
