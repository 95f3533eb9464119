//! Runs screen commands against a `ModelApi`.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::command::{Command, Outcome};
use super::state::ModelScreen;
use crate::api::{join_ids, ApiError, ExportFile, ModelApi};

/// Executes [`Command`]s and turns their results into [`Outcome`]s.
#[derive(Clone)]
pub struct CommandExecutor {
    api: Arc<dyn ModelApi>,
    export_dir: PathBuf,
}

impl CommandExecutor {
    pub fn new(api: Arc<dyn ModelApi>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            export_dir: export_dir.into(),
        }
    }

    /// Directory exported files are written to.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub async fn run(&self, command: Command) -> Outcome {
        debug!(command = command.name(), "Running command");
        match command {
            Command::Reload { seq, query } => Outcome::Loaded {
                seq,
                result: self.api.page_query(&query).await,
            },
            Command::FetchForEdit(id) => Outcome::Fetched {
                id,
                result: self.api.get(id).await,
            },
            Command::Create(config) => Outcome::Saved {
                created: true,
                result: self.api.create(&config).await,
            },
            Command::Update(config) => Outcome::Saved {
                created: false,
                result: self.api.update(&config).await,
            },
            Command::Delete(ids) => {
                let result = self.api.delete(&join_ids(&ids)).await;
                Outcome::Deleted { ids, result }
            }
            Command::Export(filter) => {
                let result = match self.api.export(&filter).await {
                    Ok(file) => self.write_export(file).await,
                    Err(e) => Err(e),
                };
                Outcome::Exported(result)
            }
            Command::LoadDictionary(dict_type) => {
                let result = self.api.dictionary(&dict_type).await;
                Outcome::DictionaryLoaded { dict_type, result }
            }
        }
    }

    async fn write_export(&self, file: ExportFile) -> Result<PathBuf, ApiError> {
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let name = file
            .file_name
            .unwrap_or_else(|| default_export_name(Local::now()));
        let path = available_path(&self.export_dir, &name).await?;
        tokio::fs::write(&path, &file.bytes).await?;

        info!(path = %path.display(), size = file.bytes.len(), "Export written");
        Ok(path)
    }
}

/// File name used when the server doesn't suggest one.
pub fn default_export_name(now: DateTime<Local>) -> String {
    format!("ai-model-{}.xlsx", now.format("%Y%m%d%H%M%S"))
}

/// `dir/name`, or `dir/stem (n).ext` if that already exists.
async fn available_path(dir: &Path, name: &str) -> std::io::Result<PathBuf> {
    let candidate = dir.join(name);
    if !tokio::fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, n, ext));
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Run `commands` and every follow-up they produce until the queue is empty.
pub async fn drive(screen: &mut ModelScreen, executor: &CommandExecutor, commands: Vec<Command>) {
    let mut queue: VecDeque<Command> = commands.into();
    while let Some(command) = queue.pop_front() {
        let outcome = executor.run(command).await;
        queue.extend(screen.apply(outcome));
    }
}
