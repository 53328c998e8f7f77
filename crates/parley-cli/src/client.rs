//! Shared HTTP client, ticket client implementation, and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use parley_api_models::{CreateRecordRequest, DeliveryReceipt, TranslationRecord};
use parley_core::{ApiError, ApiResult, Desk, LocalStore, StatusFilter, TicketApi};
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cli::OutputFormat;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Map a desk error, preferring the message the desk surfaced for display.
    pub(crate) fn from_desk(err: &ApiError, surfaced: Option<String>) -> Self {
        let message = surfaced
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| err.to_string());
        match err {
            ApiError::Validation(_) => Self::validation(message),
            ApiError::Http { status, .. } if matches!(status, 400 | 404 | 409 | 422) => {
                Self::validation(message)
            }
            ApiError::Http { .. } | ApiError::Transport(_) | ApiError::Decode(_) => {
                Self::failure(anyhow!(message))
            }
        }
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::from_desk(&err, None)
    }
}

/// Build the shared reqwest client: request timeout plus a per-invocation request id.
pub(crate) fn build_http_client(timeout_secs: u64, request_id: &str) -> CliResult<Client> {
    let mut default_headers = HeaderMap::new();
    let request_id = HeaderValue::from_str(request_id)
        .map_err(|_| CliError::failure(anyhow!("request identifier contains invalid characters")))?;
    default_headers.insert(HEADER_REQUEST_ID, request_id);

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(default_headers)
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) api: HttpTicketApi,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Fresh desk scoped to one command invocation.
    pub(crate) fn desk(&self) -> Desk<HttpTicketApi, LocalStore> {
        Desk::new(self.api.clone(), LocalStore::default())
    }
}

/// Ticket client speaking to the backend over reqwest.
#[derive(Clone, Debug)]
pub(crate) struct HttpTicketApi {
    client: Client,
    base_url: String,
}

impl HttpTicketApi {
    pub(crate) fn new(client: Client, base_url: &Url) -> Self {
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{path}", self.base_url);
        raw.parse::<Url>()
            .map_err(|err| ApiError::Transport(format!("invalid endpoint '{raw}': {err}")))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        route: &str,
    ) -> ApiResult<T> {
        debug!(route, "sending request");
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(format!("request to {route} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(route, status = status.as_u16(), "request rejected");
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(format!("failed to decode response from {route}: {err}")))
    }
}

#[async_trait(?Send)]
impl TicketApi for HttpTicketApi {
    async fn create_record(&self, request: &CreateRecordRequest) -> ApiResult<TranslationRecord> {
        let url = self.endpoint("/tickets")?;
        self.send_json(self.client.post(url).json(request), "/tickets")
            .await
    }

    async fn translate_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        let route = format!("/tickets/{id}/translate");
        let url = self.endpoint(&route)?;
        self.send_json(self.client.post(url), &route).await
    }

    async fn list_records(&self, filter: StatusFilter) -> ApiResult<Vec<TranslationRecord>> {
        let mut url = self.endpoint("/tickets")?;
        if let Some(status) = filter.status() {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        let request = self.client.get(url).header(CACHE_CONTROL, "no-store");
        self.send_json(request, "/tickets").await
    }

    async fn fetch_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        let route = format!("/tickets/{id}");
        let url = self.endpoint(&route)?;
        self.send_json(self.client.get(url), &route).await
    }

    async fn deliver_record(&self, id: i64) -> ApiResult<DeliveryReceipt> {
        let route = format!("/tickets/{id}/deliver");
        let url = self.endpoint(&route)?;
        self.send_json(self.client.post(url), &route).await
    }
}
