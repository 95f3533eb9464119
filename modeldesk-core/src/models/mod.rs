//! Model configuration records.
//!
//! This module provides:
//! - `ModelConfig` - the AI model configuration record
//! - `PageQuery` / `ModelFilter` / `Page` - listing parameters and results
//! - Field ranges, defaults and dictionary types shared by form and UI

mod config;
mod query;
mod types;

pub use config::ModelConfig;
pub use query::{ModelFilter, Page, PageQuery};
pub use types::{
    snap_ratio, DictionaryOption, ModelId, DEFAULT_EXT_DATA, DEFAULT_RESPONSE_LIMIT,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P, DICT_MODEL_PROVIDER, DICT_MODEL_TYPE, NEW_MODEL_ID,
    RATIO_RANGE, RATIO_STEP, RESPONSE_LIMIT_RANGE,
};
