//! `ModelApi` over HTTP with reqwest.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::client::{ExportFile, ModelApi};
use super::error::ApiError;
use super::response::ApiResponse;
use crate::config::Settings;
use crate::models::{DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery};

const MODEL_PATH: &str = "/ai/model";
const DICTIONARY_PATH: &str = "/system/dictionaries/type";

/// HTTP client for the model configuration endpoints.
#[derive(Debug, Clone)]
pub struct HttpModelApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpModelApi {
    /// Create a client for `base_url`.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ApiError::Http(format!("invalid base URL '{}': {}", trimmed, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Http(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Create a client from the persisted settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(
            &settings.api_base_url,
            settings.api_token.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Base URL all routes are relative to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, url = %url, "Backend request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<ApiResponse<T>, ApiError> {
        let response = builder.send().await?;
        read_envelope(response).await
    }
}

/// Decode the JSON envelope, tolerating error statuses that still carry one.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    match serde_json::from_slice::<ApiResponse<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(e) if status.is_success() => Err(e.into()),
        Err(_) => Err(ApiError::Http(format!("unexpected status {}", status))),
    }
}

#[async_trait]
impl ModelApi for HttpModelApi {
    async fn page_query(&self, query: &PageQuery) -> Result<Page<ModelConfig>, ApiError> {
        let path = format!("{}/pageQuery", MODEL_PATH);
        let builder = self
            .request(Method::GET, &path)
            .query(&query.to_query_pairs());
        Self::send::<Page<ModelConfig>>(builder).await?.into_data()
    }

    async fn get(&self, id: ModelId) -> Result<ModelConfig, ApiError> {
        let path = format!("{}/{}", MODEL_PATH, id);
        Self::send::<ModelConfig>(self.request(Method::GET, &path))
            .await?
            .into_data()
    }

    async fn create(&self, config: &ModelConfig) -> Result<String, ApiError> {
        let builder = self.request(Method::POST, MODEL_PATH).json(config);
        Ok(Self::send::<serde_json::Value>(builder).await?.check()?.message())
    }

    async fn update(&self, config: &ModelConfig) -> Result<String, ApiError> {
        let builder = self.request(Method::PUT, MODEL_PATH).json(config);
        Ok(Self::send::<serde_json::Value>(builder).await?.check()?.message())
    }

    async fn delete(&self, ids: &str) -> Result<String, ApiError> {
        let path = format!("{}/{}", MODEL_PATH, ids);
        Ok(Self::send::<serde_json::Value>(self.request(Method::DELETE, &path))
            .await?
            .check()?
            .message())
    }

    async fn export(&self, filter: &ModelFilter) -> Result<ExportFile, ApiError> {
        let path = format!("{}/exportExcel", MODEL_PATH);
        let response = self.request(Method::POST, &path).json(filter).send().await?;

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        // Failed exports come back as a JSON envelope instead of a file.
        if is_json {
            let envelope = read_envelope::<serde_json::Value>(response).await?;
            envelope.check()?;
            return Err(ApiError::Decode("export returned no file".to_string()));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(format!("unexpected status {}", status)));
        }

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_disposition);
        let bytes = response.bytes().await?.to_vec();

        debug!(size = bytes.len(), ?file_name, "Export downloaded");
        Ok(ExportFile { file_name, bytes })
    }

    async fn dictionary(&self, dict_type: &str) -> Result<Vec<DictionaryOption>, ApiError> {
        let path = format!("{}/{}", DICTIONARY_PATH, dict_type);
        let options = Self::send::<Vec<DictionaryOption>>(self.request(Method::GET, &path))
            .await?
            .into_data()?;
        if options.is_empty() {
            warn!(dict_type, "Dictionary has no options");
        }
        Ok(options)
    }
}

/// Extract a safe file name from a `Content-Disposition` header.
///
/// Prefers the RFC 5987 `filename*` form. Directory components are dropped.
pub fn file_name_from_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in value.split(';').map(str::trim) {
        let Some((key, raw)) = part.split_once('=') else {
            continue;
        };
        let raw = raw.trim().trim_matches('"');
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = raw.rsplit("''").next().unwrap_or(raw);
                extended = url::form_urlencoded::parse(format!("f={}", encoded).as_bytes())
                    .next()
                    .map(|(_, v)| v.into_owned());
            }
            "filename" => plain = Some(raw.to_string()),
            _ => {}
        }
    }

    extended
        .or(plain)
        .and_then(|name| {
            Path::new(&name.replace('\\', "/"))
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty() && name != "." && name != "..")
}
