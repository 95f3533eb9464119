//! In-memory `ModelApi` that records every call.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{ExportFile, ModelApi};
use super::error::ApiError;
use crate::models::{DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery};

/// A call received by [`FakeModelApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PageQuery(PageQuery),
    Get(ModelId),
    Create(ModelConfig),
    Update(ModelConfig),
    Delete(String),
    Export(ModelFilter),
    Dictionary(String),
}

/// Scripted backend for screen tests.
///
/// Results queued with the `push_*` methods are returned first; without
/// one, calls succeed with an empty or default payload.
#[derive(Default)]
pub struct FakeModelApi {
    calls: Mutex<Vec<Call>>,
    pages: Mutex<VecDeque<Result<Page<ModelConfig>, ApiError>>>,
    records: Mutex<HashMap<ModelId, ModelConfig>>,
    saves: Mutex<VecDeque<Result<String, ApiError>>>,
    exports: Mutex<VecDeque<Result<ExportFile, ApiError>>>,
    dictionaries: Mutex<HashMap<String, Vec<DictionaryOption>>>,
}

impl FakeModelApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, result: Result<Page<ModelConfig>, ApiError>) {
        self.pages.lock().unwrap().push_back(result);
    }

    pub fn insert_record(&self, config: ModelConfig) {
        self.records.lock().unwrap().insert(config.model_id, config);
    }

    /// Result of the next create, update or delete.
    pub fn push_save(&self, result: Result<String, ApiError>) {
        self.saves.lock().unwrap().push_back(result);
    }

    pub fn push_export(&self, result: Result<ExportFile, ApiError>) {
        self.exports.lock().unwrap().push_back(result);
    }

    pub fn set_dictionary(&self, dict_type: &str, options: Vec<DictionaryOption>) {
        self.dictionaries
            .lock()
            .unwrap()
            .insert(dict_type.to_string(), options);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than listing reloads and dictionary lookups.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::PageQuery(_) | Call::Dictionary(_)))
            .collect()
    }

    pub fn page_queries(&self) -> Vec<PageQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::PageQuery(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_save(&self) -> Result<String, ApiError> {
        self.saves
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Operation succeeded".to_string()))
    }
}

#[async_trait]
impl ModelApi for FakeModelApi {
    async fn page_query(&self, query: &PageQuery) -> Result<Page<ModelConfig>, ApiError> {
        self.record(Call::PageQuery(query.clone()));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::default()))
    }

    async fn get(&self, id: ModelId) -> Result<ModelConfig, ApiError> {
        self.record(Call::Get(id));
        self.records
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                code: 500,
                msg: "Model does not exist".to_string(),
            })
    }

    async fn create(&self, config: &ModelConfig) -> Result<String, ApiError> {
        self.record(Call::Create(config.clone()));
        self.next_save()
    }

    async fn update(&self, config: &ModelConfig) -> Result<String, ApiError> {
        self.record(Call::Update(config.clone()));
        self.next_save()
    }

    async fn delete(&self, ids: &str) -> Result<String, ApiError> {
        self.record(Call::Delete(ids.to_string()));
        self.next_save()
    }

    async fn export(&self, filter: &ModelFilter) -> Result<ExportFile, ApiError> {
        self.record(Call::Export(filter.clone()));
        self.exports
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ExportFile {
                    file_name: None,
                    bytes: Vec::new(),
                })
            })
    }

    async fn dictionary(&self, dict_type: &str) -> Result<Vec<DictionaryOption>, ApiError> {
        self.record(Call::Dictionary(dict_type.to_string()));
        Ok(self
            .dictionaries
            .lock()
            .unwrap()
            .get(dict_type)
            .cloned()
            .unwrap_or_default())
    }
}
