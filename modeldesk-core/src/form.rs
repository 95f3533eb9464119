//! Editor form state and validation.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{ModelConfig, ModelId, DICT_MODEL_PROVIDER, DICT_MODEL_TYPE};

/// A field of the editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Supplier,
    ModelType,
    Model,
    Alias,
    ApiKey,
    BaseUrl,
    ResponseLimit,
    Temperature,
    TopP,
    ExtData,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 10] = [
        Field::Supplier,
        Field::ModelType,
        Field::Model,
        Field::Alias,
        Field::ApiKey,
        Field::BaseUrl,
        Field::ResponseLimit,
        Field::Temperature,
        Field::TopP,
        Field::ExtData,
    ];

    /// Text fields that must be non-blank to save.
    pub const REQUIRED_TEXT: [Field; 6] = [
        Field::Supplier,
        Field::ModelType,
        Field::Model,
        Field::Alias,
        Field::ApiKey,
        Field::BaseUrl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Supplier => "Supplier",
            Field::ModelType => "Model type",
            Field::Model => "Model",
            Field::Alias => "Alias",
            Field::ApiKey => "API key",
            Field::BaseUrl => "Base URL",
            Field::ResponseLimit => "Response limit",
            Field::Temperature => "Temperature",
            Field::TopP => "Top P",
            Field::ExtData => "Extra data",
        }
    }

    pub fn help(self) -> Option<&'static str> {
        match self {
            Field::Model => Some("Standard model name on the provider platform"),
            Field::Alias => Some("Name used by programs to reference this model"),
            Field::ExtData => Some("Provider-specific parameters, see the provider docs"),
            _ => None,
        }
    }

    /// Dictionary type backing this field's select, if any.
    pub fn dictionary(self) -> Option<&'static str> {
        match self {
            Field::Supplier => Some(DICT_MODEL_PROVIDER),
            Field::ModelType => Some(DICT_MODEL_TYPE),
            _ => None,
        }
    }

    pub fn is_required(self) -> bool {
        self != Field::ExtData
    }
}

/// A client-side validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Required(Field),
}

impl FormError {
    pub fn field(&self) -> Field {
        match self {
            FormError::Required(field) => *field,
        }
    }
}

/// Values and inline errors of the create/update editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelForm {
    /// Current field values, bound directly to the inputs.
    pub values: ModelConfig,
    errors: BTreeMap<Field, FormError>,
}

impl ModelForm {
    /// Blank form for creating a record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from a fetched record.
    pub fn from_record(mut record: ModelConfig) -> Self {
        record.clamp_to_ranges();
        Self {
            values: record,
            errors: BTreeMap::new(),
        }
    }

    /// Restore defaults and clear all errors.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn model_id(&self) -> ModelId {
        self.values.model_id
    }

    pub fn is_new(&self) -> bool {
        self.values.is_new()
    }

    pub fn title(&self) -> &'static str {
        if self.is_new() {
            "Add AI Model"
        } else {
            "Update AI Model"
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        if self.is_new() {
            "Add"
        } else {
            "Update"
        }
    }

    /// Mutable access to a text field's value.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        text_of(&mut self.values, field)
    }

    fn text(&self, field: Field) -> &str {
        let v = &self.values;
        match field {
            Field::Supplier => &v.model_supplier,
            Field::ModelType => &v.model_type,
            Field::Model => &v.model,
            Field::Alias => &v.alias,
            Field::ApiKey => &v.api_key,
            Field::BaseUrl => &v.base_url,
            Field::ExtData => &v.ext_data,
            Field::ResponseLimit | Field::Temperature | Field::TopP => "",
        }
    }

    /// Set a text field and clear its error.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.text_mut(field) {
            *slot = value.into();
        }
        self.field_edited(field);
    }

    /// Inline error currently shown for `field`.
    pub fn error(&self, field: Field) -> Option<&FormError> {
        self.errors.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Clear the inline error after the user changed a field.
    pub fn field_edited(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Check required fields.
    ///
    /// On success returns the record to submit (text trimmed, numbers
    /// clamped). On failure the inline errors are updated and returned.
    pub fn validate(&mut self) -> Result<ModelConfig, Vec<FormError>> {
        self.errors = Field::REQUIRED_TEXT
            .iter()
            .filter(|field| self.text(**field).trim().is_empty())
            .map(|field| (*field, FormError::Required(*field)))
            .collect();

        if !self.errors.is_empty() {
            return Err(self.errors.values().cloned().collect());
        }

        let mut record = self.values.clone();
        for field in Field::REQUIRED_TEXT {
            if let Some(value) = text_of(&mut record, field) {
                *value = value.trim().to_string();
            }
        }
        record.clamp_to_ranges();
        Ok(record)
    }
}

fn text_of(record: &mut ModelConfig, field: Field) -> Option<&mut String> {
    match field {
        Field::Supplier => Some(&mut record.model_supplier),
        Field::ModelType => Some(&mut record.model_type),
        Field::Model => Some(&mut record.model),
        Field::Alias => Some(&mut record.alias),
        Field::ApiKey => Some(&mut record.api_key),
        Field::BaseUrl => Some(&mut record.base_url),
        Field::ExtData => Some(&mut record.ext_data),
        Field::ResponseLimit | Field::Temperature | Field::TopP => None,
    }
}
