//! Side effects requested by the screen and their results.

use std::path::PathBuf;

use crate::api::ApiError;
use crate::models::{DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery};

/// A backend call the screen wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the listing page; `seq` identifies the request.
    Reload { seq: u64, query: PageQuery },
    /// Fetch one record before opening it in the editor.
    FetchForEdit(ModelId),
    Create(ModelConfig),
    Update(ModelConfig),
    /// Delete all ids in a single request.
    Delete(Vec<ModelId>),
    Export(ModelFilter),
    LoadDictionary(String),
}

impl Command {
    /// Short name for logs. Never includes record contents.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Reload { .. } => "reload",
            Command::FetchForEdit(_) => "fetch_for_edit",
            Command::Create(_) => "create",
            Command::Update(_) => "update",
            Command::Delete(_) => "delete",
            Command::Export(_) => "export",
            Command::LoadDictionary(_) => "load_dictionary",
        }
    }
}

/// Result of running a [`Command`], fed back into the screen.
#[derive(Debug)]
pub enum Outcome {
    Loaded {
        seq: u64,
        result: Result<Page<ModelConfig>, ApiError>,
    },
    Fetched {
        id: ModelId,
        result: Result<ModelConfig, ApiError>,
    },
    Saved {
        created: bool,
        result: Result<String, ApiError>,
    },
    Deleted {
        ids: Vec<ModelId>,
        result: Result<String, ApiError>,
    },
    /// Path of the written export file.
    Exported(Result<PathBuf, ApiError>),
    DictionaryLoaded {
        dict_type: String,
        result: Result<Vec<DictionaryOption>, ApiError>,
    },
}

impl Outcome {
    /// The outcome of `command` failing with `error` before it reached the backend.
    pub fn failure(command: Command, error: ApiError) -> Outcome {
        match command {
            Command::Reload { seq, .. } => Outcome::Loaded {
                seq,
                result: Err(error),
            },
            Command::FetchForEdit(id) => Outcome::Fetched {
                id,
                result: Err(error),
            },
            Command::Create(_) => Outcome::Saved {
                created: true,
                result: Err(error),
            },
            Command::Update(_) => Outcome::Saved {
                created: false,
                result: Err(error),
            },
            Command::Delete(ids) => Outcome::Deleted {
                ids,
                result: Err(error),
            },
            Command::Export(_) => Outcome::Exported(Err(error)),
            Command::LoadDictionary(dict_type) => Outcome::DictionaryLoaded {
                dict_type,
                result: Err(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ModelScreen;

    #[test]
    fn test_failure_resets_busy_flags() {
        let mut screen = ModelScreen::new(10);
        let reload = screen.reload();
        let fetch = screen.edit(3).unwrap();
        assert!(screen.is_busy());

        for command in [reload, fetch] {
            let follow_up = screen.apply(Outcome::failure(
                command,
                ApiError::Http("no backend".to_string()),
            ));
            assert!(follow_up.is_empty());
        }
        assert!(!screen.is_busy());
        assert_eq!(screen.notices().len(), 2);
    }

    #[test]
    fn test_command_names_hide_contents() {
        let command = Command::Create(ModelConfig {
            api_key: "sk-secret".to_string(),
            ..Default::default()
        });
        assert_eq!(command.name(), "create");
    }
}
