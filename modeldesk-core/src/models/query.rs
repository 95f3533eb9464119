//! Listing query parameters and page results.

use serde::{Deserialize, Serialize};

use super::types::null_as_default;
use crate::config::DEFAULT_PAGE_SIZE;

/// Search-form filters of the listing. Empty strings mean "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelFilter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_supplier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,
}

impl ModelFilter {
    /// Copy with surrounding whitespace removed from every value.
    pub fn trimmed(&self) -> Self {
        Self {
            model_supplier: self.model_supplier.trim().to_string(),
            model_type: self.model_type.trim().to_string(),
            model: self.model.trim().to_string(),
            alias: self.alias.trim().to_string(),
        }
    }

    /// Whether no filter value is set.
    pub fn is_empty(&self) -> bool {
        self.model_supplier.is_empty()
            && self.model_type.is_empty()
            && self.model.is_empty()
            && self.alias.is_empty()
    }

    /// Non-empty filters as `(wire name, value)` pairs.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("modelSupplier", &self.model_supplier),
            ("modelType", &self.model_type),
            ("model", &self.model),
            ("alias", &self.alias),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k, v.clone()))
        .collect()
    }
}

/// Pagination and filter parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number.
    pub current: u32,
    pub page_size: u32,
    pub filter: ModelFilter,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl PageQuery {
    /// First page with the given size and no filter.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            filter: ModelFilter::default(),
        }
    }

    /// Query string pairs as sent to the page-query endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("current", self.current.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        pairs.extend(self.filter.pairs());
        pairs
    }

    /// Number of pages for `total` records (at least 1).
    pub fn page_count(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.max(1));
        total.div_ceil(size).max(1).min(u64::from(u32::MAX)) as u32
    }
}

/// One page of records plus the total count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<T>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
        }
    }
}
