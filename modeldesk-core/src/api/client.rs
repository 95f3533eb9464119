//! The backend contract consumed by the screen.

use async_trait::async_trait;

use super::error::ApiError;
use crate::models::{DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery};

/// A file produced by the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Name suggested by the server, if any.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// REST operations on model configuration records.
///
/// Mutating calls return the server message on success.
#[async_trait]
pub trait ModelApi: Send + Sync {
    /// Fetch one page of records and the total count.
    async fn page_query(&self, query: &PageQuery) -> Result<Page<ModelConfig>, ApiError>;

    /// Fetch a single record.
    async fn get(&self, id: ModelId) -> Result<ModelConfig, ApiError>;

    /// Create a record (`model_id` is 0, the server assigns one).
    async fn create(&self, config: &ModelConfig) -> Result<String, ApiError>;

    /// Update a record in place.
    async fn update(&self, config: &ModelConfig) -> Result<String, ApiError>;

    /// Delete records by comma-joined ids (see [`join_ids`]).
    async fn delete(&self, ids: &str) -> Result<String, ApiError>;

    /// Export records matching the filter.
    async fn export(&self, filter: &ModelFilter) -> Result<ExportFile, ApiError>;

    /// Options of a dictionary-backed select.
    async fn dictionary(&self, dict_type: &str) -> Result<Vec<DictionaryOption>, ApiError>;
}

/// Join ids the way the delete endpoint expects them: `1,2,3`.
pub fn join_ids(ids: &[ModelId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
