//! Core model type definitions.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier. `0` means "not yet created".
pub type ModelId = i64;

/// Sentinel id of a record that has not been saved yet.
pub const NEW_MODEL_ID: ModelId = 0;

/// Slider range for `responseLimit`.
pub const RESPONSE_LIMIT_RANGE: std::ops::RangeInclusive<u32> = 0..=4096;
/// Default `responseLimit`.
pub const DEFAULT_RESPONSE_LIMIT: u32 = 1142;

/// Slider range shared by `temperature` and `topP`.
pub const RATIO_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;
/// Slider step shared by `temperature` and `topP`.
pub const RATIO_STEP: f64 = 0.1;
/// Default `temperature`.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
/// Default `topP`.
pub const DEFAULT_TOP_P: f64 = 0.5;

/// Default `extData`.
pub const DEFAULT_EXT_DATA: &str = "{}";

/// Dictionary type backing the supplier select.
pub const DICT_MODEL_PROVIDER: &str = "ai_model_provider";
/// Dictionary type backing the model type select.
pub const DICT_MODEL_TYPE: &str = "ai_model_type";

/// One option of a dictionary-backed select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryOption {
    /// Human-readable label.
    #[serde(rename = "dictLabel")]
    pub label: String,
    /// Value stored on the record.
    #[serde(rename = "dictValue")]
    pub value: String,
}

/// Clamp a ratio to `0.0..=1.0` and snap it to the slider step.
pub fn snap_ratio(value: f64) -> f64 {
    if !value.is_finite() {
        return *RATIO_RANGE.start();
    }
    let clamped = value.clamp(*RATIO_RANGE.start(), *RATIO_RANGE.end());
    let steps = (1.0 / RATIO_STEP).round();
    (clamped * steps).round() / steps
}

/// Treat a JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn null_as_default_response_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_RESPONSE_LIMIT))
}

pub(crate) fn null_as_default_temperature<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_TEMPERATURE))
}

pub(crate) fn null_as_default_top_p<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_TOP_P))
}

pub(crate) fn null_as_default_ext_data<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_EXT_DATA.to_string()))
}
