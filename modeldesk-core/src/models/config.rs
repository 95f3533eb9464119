//! AI model configuration record.

use serde::{Deserialize, Serialize};

use super::types::{
    null_as_default, null_as_default_ext_data, null_as_default_response_limit,
    null_as_default_temperature, null_as_default_top_p, snap_ratio, ModelId, DEFAULT_EXT_DATA,
    DEFAULT_RESPONSE_LIMIT, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, NEW_MODEL_ID,
    RESPONSE_LIMIT_RANGE,
};

/// One AI model configuration entry as exchanged with the backend.
///
/// Missing or `null` fields deserialize to their defaults, unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    /// Server-assigned id, `0` until created.
    #[serde(deserialize_with = "null_as_default")]
    pub model_id: ModelId,
    /// Provider, a value of the `ai_model_provider` dictionary.
    #[serde(deserialize_with = "null_as_default")]
    pub model_supplier: String,
    /// Model type, a value of the `ai_model_type` dictionary.
    #[serde(deserialize_with = "null_as_default")]
    pub model_type: String,
    /// Standard model name on the provider platform (e.g. "gpt-4").
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    /// Name used by programs to reference this model.
    #[serde(deserialize_with = "null_as_default")]
    pub alias: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub base_url: String,
    /// Maximum response length (0..=4096).
    #[serde(deserialize_with = "null_as_default_response_limit")]
    pub response_limit: u32,
    /// Sampling temperature (0..=1, step 0.1).
    #[serde(deserialize_with = "null_as_default_temperature")]
    pub temperature: f64,
    /// Nucleus sampling (0..=1, step 0.1).
    #[serde(deserialize_with = "null_as_default_top_p")]
    pub top_p: f64,
    /// Provider-specific parameters as JSON text.
    #[serde(deserialize_with = "null_as_default_ext_data")]
    pub ext_data: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: NEW_MODEL_ID,
            model_supplier: String::new(),
            model_type: String::new(),
            model: String::new(),
            alias: String::new(),
            api_key: String::new(),
            base_url: String::new(),
            response_limit: DEFAULT_RESPONSE_LIMIT,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            ext_data: DEFAULT_EXT_DATA.to_string(),
        }
    }
}

impl ModelConfig {
    /// Whether this record has not been created on the server yet.
    pub fn is_new(&self) -> bool {
        self.model_id == NEW_MODEL_ID
    }

    /// Clamp numeric fields to their slider ranges.
    pub fn clamp_to_ranges(&mut self) {
        self.response_limit = self
            .response_limit
            .clamp(*RESPONSE_LIMIT_RANGE.start(), *RESPONSE_LIMIT_RANGE.end());
        self.temperature = snap_ratio(self.temperature);
        self.top_p = snap_ratio(self.top_p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert!(config.is_new());
        assert_eq!(config.response_limit, 1142);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.ext_data, "{}");
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let config = ModelConfig {
            model_supplier: "openai".to_string(),
            model_type: "chat".to_string(),
            model: "gpt-4".to_string(),
            alias: "gpt4".to_string(),
            api_key: "sk-x".to_string(),
            base_url: "https://api.openai.com".to_string(),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "modelId": 0,
                "modelSupplier": "openai",
                "modelType": "chat",
                "model": "gpt-4",
                "alias": "gpt4",
                "apiKey": "sk-x",
                "baseUrl": "https://api.openai.com",
                "responseLimit": 1142,
                "temperature": 0.5,
                "topP": 0.5,
                "extData": "{}"
            })
        );
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let config: ModelConfig = serde_json::from_value(json!({
            "modelId": 42,
            "modelSupplier": "deepseek",
            "modelType": null,
            "model": "deepseek-chat",
            "createTime": "2024-05-01 10:00:00",
            "temperature": 0.7,
            "responseLimit": null,
            "topP": null,
            "extData": null
        }))
        .unwrap();

        assert_eq!(config.model_id, 42);
        assert_eq!(config.model_supplier, "deepseek");
        assert_eq!(config.model_type, "");
        assert_eq!(config.alias, "");
        assert_eq!(config.response_limit, 1142);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.ext_data, "{}");
        assert!(!config.is_new());
    }

    #[test]
    fn test_null_numbers_and_ext_data_take_defaults() {
        let config: ModelConfig = serde_json::from_value(json!({
            "modelId": 3,
            "modelSupplier": "openai",
            "responseLimit": null,
            "temperature": null,
            "topP": null,
            "extData": null
        }))
        .unwrap();

        assert_eq!(config.model_id, 3);
        assert_eq!(config.response_limit, 1142);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.ext_data, "{}");
    }

    #[test]
    fn test_clamp_to_ranges() {
        let mut config = ModelConfig {
            response_limit: 9000,
            temperature: 1.4,
            top_p: 0.33,
            ..Default::default()
        };
        config.clamp_to_ranges();

        assert_eq!(config.response_limit, 4096);
        assert_eq!(config.temperature, 1.0);
        assert!((config.top_p - 0.3).abs() < 1e-9);
    }
}
