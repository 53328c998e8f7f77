//! HTTP client for the ticket backend (gloo-net).
//!
//! # Design
//! - One client per app boot, shared through the API context.
//! - Every non-2xx response is normalized into [`ApiError::Http`] before it reaches the desk.
//! - History fetches bypass the browser cache.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use parley_api_models::{CreateRecordRequest, DeliveryReceipt, TranslationRecord};
use parley_core::config::resolve_base_url;
use parley_core::{ApiError, ApiResult, StatusFilter, TicketApi};
use serde::de::DeserializeOwned;
use web_sys::RequestCache;

/// Backend client used by the desk workflows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client for the URL baked in at build time through `PARLEY_API_URL`.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            base_url: resolve_base_url(option_env!("PARLEY_API_URL")),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(request: Request) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl TicketApi for ApiClient {
    async fn create_record(&self, request: &CreateRecordRequest) -> ApiResult<TranslationRecord> {
        let request = Request::post(&self.url("/tickets"))
            .json(request)
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Self::send_json(request).await
    }

    async fn translate_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        Self::send_json(Request::post(&self.url(&format!("/tickets/{id}/translate")))).await
    }

    async fn list_records(&self, filter: StatusFilter) -> ApiResult<Vec<TranslationRecord>> {
        let path = filter
            .status()
            .map_or_else(|| "/tickets".to_string(), |status| format!("/tickets?status={status}"));
        let request = Request::get(&self.url(&path))
            .header("Cache-Control", "no-store")
            .cache(RequestCache::NoStore);
        Self::send_json(request).await
    }

    async fn fetch_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        Self::send_json(Request::get(&self.url(&format!("/tickets/{id}")))).await
    }

    async fn deliver_record(&self, id: i64) -> ApiResult<DeliveryReceipt> {
        Self::send_json(Request::post(&self.url(&format!("/tickets/{id}/deliver")))).await
    }
}
