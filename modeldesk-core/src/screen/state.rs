//! The record manager screen state machine.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use super::command::{Command, Outcome};
use super::notice::Notice;
use crate::api::ApiError;
use crate::form::ModelForm;
use crate::models::{
    DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery, DICT_MODEL_PROVIDER,
    DICT_MODEL_TYPE,
};

const DEFAULT_SUCCESS_MESSAGE: &str = "Operation succeeded";

/// Visibility and mode of the editor modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    /// Blank form, id 0.
    Create,
    /// Form populated from the fetched record.
    Edit(ModelId),
}

impl EditorState {
    pub fn is_open(self) -> bool {
        self != EditorState::Closed
    }
}

/// An action waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    DeleteOne(ModelId),
    DeleteMany(Vec<ModelId>),
    Export(ModelFilter),
}

impl PendingConfirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingConfirm::DeleteOne(_) => "Delete this record?",
            PendingConfirm::DeleteMany(_) => "Delete the selected records?",
            PendingConfirm::Export(_) => "Export data?",
        }
    }

    fn into_command(self) -> Command {
        match self {
            PendingConfirm::DeleteOne(id) => Command::Delete(vec![id]),
            PendingConfirm::DeleteMany(ids) => Command::Delete(ids),
            PendingConfirm::Export(filter) => Command::Export(filter),
        }
    }
}

/// State of the AI model record manager.
///
/// User intents mutate local state and return the [`Command`]s to run.
/// Results come back through [`ModelScreen::apply`].
#[derive(Debug)]
pub struct ModelScreen {
    query: PageQuery,
    filter_draft: ModelFilter,
    records: Vec<ModelConfig>,
    total: u64,
    selected: BTreeSet<ModelId>,
    loading: bool,
    reload_seq: u64,

    editor: EditorState,
    form: ModelForm,
    saving: bool,
    fetching: Option<ModelId>,

    confirm: Option<PendingConfirm>,
    exporting: bool,

    dictionaries: HashMap<String, Vec<DictionaryOption>>,
    notices: Vec<Notice>,
}

impl ModelScreen {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: PageQuery::with_page_size(page_size),
            filter_draft: ModelFilter::default(),
            records: Vec::new(),
            total: 0,
            selected: BTreeSet::new(),
            loading: false,
            reload_seq: 0,
            editor: EditorState::Closed,
            form: ModelForm::new(),
            saving: false,
            fetching: None,
            confirm: None,
            exporting: false,
            dictionaries: HashMap::new(),
            notices: Vec::new(),
        }
    }

    /// Commands issued when the screen is first shown.
    pub fn start(&mut self) -> Vec<Command> {
        vec![
            Command::LoadDictionary(DICT_MODEL_PROVIDER.to_string()),
            Command::LoadDictionary(DICT_MODEL_TYPE.to_string()),
            self.reload(),
        ]
    }

    // =========================================================================
    // Listing
    // =========================================================================

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn records(&self) -> &[ModelConfig] {
        &self.records
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_count(&self) -> u32 {
        self.query.page_count(self.total)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Re-fetch the current page with the active parameters.
    pub fn reload(&mut self) -> Command {
        self.reload_seq += 1;
        self.loading = true;
        Command::Reload {
            seq: self.reload_seq,
            query: self.query.clone(),
        }
    }

    /// Search form values, not applied until [`search`](Self::search).
    pub fn filter_draft(&self) -> &ModelFilter {
        &self.filter_draft
    }

    pub fn filter_draft_mut(&mut self) -> &mut ModelFilter {
        &mut self.filter_draft
    }

    /// Apply the search form and go back to the first page.
    pub fn search(&mut self) -> Command {
        self.query.filter = self.filter_draft.trimmed();
        self.query.current = 1;
        self.reload()
    }

    /// Clear the search form and reload from the first page.
    pub fn reset_filter(&mut self) -> Command {
        self.filter_draft = ModelFilter::default();
        self.search()
    }

    /// Navigate to `page`, clamped to the known page range.
    pub fn go_to_page(&mut self, page: u32) -> Option<Command> {
        let page = page.clamp(1, self.page_count());
        if page == self.query.current {
            return None;
        }
        self.query.current = page;
        Some(self.reload())
    }

    pub fn set_page_size(&mut self, size: u32) -> Option<Command> {
        let size = size.max(1);
        if size == self.query.page_size {
            return None;
        }
        self.query.page_size = size;
        self.query.current = 1;
        Some(self.reload())
    }

    pub fn selected(&self) -> &BTreeSet<ModelId> {
        &self.selected
    }

    pub fn is_selected(&self, id: ModelId) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_selected(&mut self, id: ModelId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Whether every row on the page is selected (false for an empty page).
    pub fn all_selected(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| self.selected.contains(&r.model_id))
    }

    /// Select or deselect every row on the page.
    pub fn set_all_selected(&mut self, selected: bool) {
        if selected {
            self.selected
                .extend(self.records.iter().map(|r| r.model_id));
        } else {
            self.selected.clear();
        }
    }

    // =========================================================================
    // Editor
    // =========================================================================

    pub fn editor(&self) -> EditorState {
        self.editor
    }

    pub fn form(&self) -> &ModelForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ModelForm {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Id whose record is being fetched for editing.
    pub fn fetching(&self) -> Option<ModelId> {
        self.fetching
    }

    /// Open the editor with a blank record.
    pub fn add(&mut self) {
        self.form.reset();
        self.editor = EditorState::Create;
    }

    /// Fetch a record and open it once it arrives.
    pub fn edit(&mut self, id: ModelId) -> Option<Command> {
        if self.fetching.is_some() {
            debug!(model_id = id, "Edit ignored, a fetch is in flight");
            return None;
        }
        self.fetching = Some(id);
        Some(Command::FetchForEdit(id))
    }

    /// Close the editor and discard its values.
    /// Close the editor and discard its values. Ignored while a save is in flight.
    pub fn cancel_editor(&mut self) {
        if self.saving {
            return;
        }
        self.editor = EditorState::Closed;
        self.form.reset();
    }

    /// Validate the form and dispatch create or update.
    pub fn submit(&mut self) -> Option<Command> {
        if self.saving || !self.editor.is_open() {
            return None;
        }
        let record = match self.form.validate() {
            Ok(record) => record,
            Err(errors) => {
                debug!(count = errors.len(), "Form has validation errors");
                return None;
            }
        };

        self.saving = true;
        Some(if record.is_new() {
            Command::Create(record)
        } else {
            Command::Update(record)
        })
    }

    // =========================================================================
    // Delete and export
    // =========================================================================

    /// Ask to delete a single row.
    pub fn request_delete(&mut self, id: ModelId) {
        self.confirm = Some(PendingConfirm::DeleteOne(id));
    }

    /// Ask to delete the selected rows. Does nothing without a selection.
    pub fn request_delete_selected(&mut self) -> bool {
        let ids: Vec<ModelId> = self.selected.iter().copied().collect();
        self.request_delete_ids(ids)
    }

    /// Ask to delete `ids`. Returns false (and asks nothing) when empty.
    pub fn request_delete_ids(&mut self, ids: Vec<ModelId>) -> bool {
        if ids.is_empty() {
            return false;
        }
        self.confirm = Some(PendingConfirm::DeleteMany(ids));
        true
    }

    /// Ask to export the records matching the search form.
    /// Ask to export the current filter. Ignored while an export is running.
    pub fn request_export(&mut self) {
        if self.exporting {
            return;
        }
        self.confirm = Some(PendingConfirm::Export(self.filter_draft.trimmed()));
    }

    pub fn pending_confirm(&self) -> Option<&PendingConfirm> {
        self.confirm.as_ref()
    }

    /// Accept the pending confirmation.
    pub fn confirm(&mut self) -> Option<Command> {
        let command = self.confirm.take()?.into_command();
        if matches!(command, Command::Export(_)) {
            self.exporting = true;
        }
        Some(command)
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    // =========================================================================
    // Dictionaries and notices
    // =========================================================================

    /// Options of a dictionary, empty until loaded.
    pub fn dictionary(&self, dict_type: &str) -> &[DictionaryOption] {
        self.dictionaries
            .get(dict_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Label for `value`, or the value itself when unknown.
    pub fn dictionary_label<'a>(&'a self, dict_type: &str, value: &'a str) -> &'a str {
        self.dictionary(dict_type)
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn expire_notices(&mut self, now: DateTime<Local>) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    /// Whether any backend call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.saving || self.exporting || self.fetching.is_some()
    }

    // =========================================================================
    // Outcomes
    // =========================================================================

    /// Apply a finished command and return the follow-up commands.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Loaded { seq, result } => self.on_loaded(seq, result),
            Outcome::Fetched { id, result } => {
                self.fetching = None;
                match result {
                    Ok(record) => {
                        self.form = ModelForm::from_record(record);
                        self.editor = EditorState::Edit(id);
                    }
                    Err(e) => self.report("fetch_for_edit", &e),
                }
                Vec::new()
            }
            Outcome::Saved { created, result } => {
                self.saving = false;
                match result {
                    Ok(msg) => {
                        info!(created, "Record saved");
                        self.succeed(msg);
                        self.editor = EditorState::Closed;
                        self.form.reset();
                        vec![self.reload()]
                    }
                    Err(e) => {
                        self.report(if created { "create" } else { "update" }, &e);
                        Vec::new()
                    }
                }
            }
            Outcome::Deleted { ids, result } => match result {
                Ok(msg) => {
                    info!(count = ids.len(), "Records deleted");
                    for id in &ids {
                        self.selected.remove(id);
                    }
                    self.succeed(msg);
                    vec![self.reload()]
                }
                Err(e) => {
                    self.report("delete", &e);
                    Vec::new()
                }
            },
            Outcome::Exported(result) => {
                self.exporting = false;
                match result {
                    Ok(path) => self.push_notice(Notice::success(format!(
                        "Exported to {}",
                        path.display()
                    ))),
                    Err(e) => self.report("export", &e),
                }
                Vec::new()
            }
            Outcome::DictionaryLoaded { dict_type, result } => {
                match result {
                    Ok(options) => {
                        debug!(dict_type = %dict_type, count = options.len(), "Dictionary loaded");
                        self.dictionaries.insert(dict_type, options);
                    }
                    Err(e) => self.report("load_dictionary", &e),
                }
                Vec::new()
            }
        }
    }

    fn on_loaded(&mut self, seq: u64, result: Result<Page<ModelConfig>, ApiError>) -> Vec<Command> {
        if seq != self.reload_seq {
            debug!(seq, latest = self.reload_seq, "Discarding stale listing");
            return Vec::new();
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.total = page.total;
                self.records = page.records;
                let on_page: BTreeSet<ModelId> = self.records.iter().map(|r| r.model_id).collect();
                self.selected.retain(|id| on_page.contains(id));

                // The page emptied out (e.g. its last rows were deleted).
                let last = self.page_count();
                if self.records.is_empty() && self.query.current > last {
                    self.query.current = last;
                    return vec![self.reload()];
                }
                Vec::new()
            }
            Err(e) => {
                self.report("reload", &e);
                Vec::new()
            }
        }
    }

    fn succeed(&mut self, msg: String) {
        let text = if msg.trim().is_empty() {
            DEFAULT_SUCCESS_MESSAGE.to_string()
        } else {
            msg
        };
        self.push_notice(Notice::success(text));
    }

    fn report(&mut self, action: &str, err: &ApiError) {
        if err.is_unexpected() {
            error!(action, error = %err, "Backend call failed");
        } else {
            warn!(action, error = %err, "Backend rejected request");
        }
        self.push_notice(Notice::error(err.user_message()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::api::fake::{Call, FakeModelApi};
    use crate::api::{ExportFile, GENERIC_FAILURE_MESSAGE};
    use crate::form::{Field, FormError};
    use crate::screen::notice::NoticeKind;
    use crate::screen::{drive, CommandExecutor};

    struct Harness {
        api: Arc<FakeModelApi>,
        executor: CommandExecutor,
        screen: ModelScreen,
        _dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let api = Arc::new(FakeModelApi::new());
            let executor = CommandExecutor::new(api.clone(), dir.path());
            Self {
                api,
                executor,
                screen: ModelScreen::new(10),
                _dir: dir,
            }
        }

        async fn run(&mut self, commands: Vec<Command>) {
            drive(&mut self.screen, &self.executor, commands).await;
        }

        async fn run_one(&mut self, command: Option<Command>) {
            self.run(command.into_iter().collect()).await;
        }
    }

    fn record(id: ModelId, alias: &str) -> ModelConfig {
        ModelConfig {
            model_id: id,
            model_supplier: "openai".to_string(),
            model_type: "chat".to_string(),
            model: "gpt-4".to_string(),
            alias: alias.to_string(),
            api_key: "sk-x".to_string(),
            base_url: "https://api.openai.com".to_string(),
            ..Default::default()
        }
    }

    fn page(records: Vec<ModelConfig>, total: u64) -> Page<ModelConfig> {
        Page { records, total }
    }

    fn fill_create_example(screen: &mut ModelScreen) {
        let form = screen.form_mut();
        form.set_text(Field::Supplier, "openai");
        form.set_text(Field::ModelType, "chat");
        form.set_text(Field::Model, "gpt-4");
        form.set_text(Field::Alias, "gpt4");
        form.set_text(Field::ApiKey, "sk-x");
        form.set_text(Field::BaseUrl, "https://api.openai.com");
    }

    fn last_notice(screen: &ModelScreen) -> &Notice {
        screen.notices().last().unwrap()
    }

    #[tokio::test]
    async fn test_start_loads_dictionaries_and_first_page() {
        let mut h = Harness::new();
        h.api.set_dictionary(
            DICT_MODEL_PROVIDER,
            vec![DictionaryOption {
                label: "OpenAI".to_string(),
                value: "openai".to_string(),
            }],
        );
        h.api.push_page(Ok(page(vec![record(1, "a"), record(2, "b")], 2)));

        let commands = h.screen.start();
        h.run(commands).await;

        assert_eq!(h.screen.records().len(), 2);
        assert_eq!(h.screen.total(), 2);
        assert!(!h.screen.is_loading());
        assert_eq!(h.screen.dictionary_label(DICT_MODEL_PROVIDER, "openai"), "OpenAI");
        assert_eq!(h.screen.dictionary_label(DICT_MODEL_TYPE, "chat"), "chat");
        assert_eq!(h.api.page_queries(), vec![PageQuery::with_page_size(10)]);
    }

    #[tokio::test]
    async fn test_create_flow_sends_full_record_and_reloads() {
        let mut h = Harness::new();
        h.screen.add();
        assert_eq!(h.screen.editor(), EditorState::Create);
        fill_create_example(&mut h.screen);

        let command = h.screen.submit();
        assert!(h.screen.is_saving());
        h.run_one(command).await;

        let mutations = h.api.mutations();
        let Call::Create(sent) = &mutations[0] else {
            panic!("expected create, got {:?}", mutations);
        };
        assert_eq!(
            serde_json::to_value(sent).unwrap(),
            serde_json::json!({
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

        assert_eq!(h.screen.editor(), EditorState::Closed);
        assert!(!h.screen.is_saving());
        assert_eq!(h.screen.form(), &ModelForm::new());
        assert_eq!(h.api.page_queries().len(), 1);
        assert_eq!(last_notice(&h.screen).kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn test_save_with_id_updates() {
        let mut h = Harness::new();
        h.api.insert_record(record(7, "gpt4"));

        let command = h.screen.edit(7);
        h.run_one(command).await;
        assert_eq!(h.screen.editor(), EditorState::Edit(7));
        assert_eq!(h.screen.form().values.alias, "gpt4");

        h.screen.form_mut().set_text(Field::Alias, "gpt4-prod");
        let command = h.screen.submit();
        h.run_one(command).await;

        let mutations = h.api.mutations();
        assert_eq!(mutations[0], Call::Get(7));
        let Call::Update(sent) = &mutations[1] else {
            panic!("expected update, got {:?}", mutations);
        };
        assert_eq!(sent.model_id, 7);
        assert_eq!(sent.alias, "gpt4-prod");
        assert_eq!(h.screen.editor(), EditorState::Closed);
    }

    #[tokio::test]
    async fn test_invalid_submit_issues_no_call() {
        let mut h = Harness::new();
        h.screen.add();
        fill_create_example(&mut h.screen);
        h.screen.form_mut().set_text(Field::BaseUrl, " ");

        assert!(h.screen.submit().is_none());
        assert!(!h.screen.is_saving());
        assert_eq!(h.screen.editor(), EditorState::Create);
        assert_eq!(
            h.screen.form().error(Field::BaseUrl),
            Some(&FormError::Required(Field::BaseUrl))
        );
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_editor_open() {
        let mut h = Harness::new();
        h.api.push_save(Err(ApiError::Rejected {
            code: 500,
            msg: "Alias already exists".to_string(),
        }));
        h.screen.add();
        fill_create_example(&mut h.screen);

        let command = h.screen.submit();
        h.run_one(command).await;

        assert_eq!(h.screen.editor(), EditorState::Create);
        assert_eq!(h.screen.form().values.alias, "gpt4");
        assert!(!h.screen.is_saving());
        assert!(h.api.page_queries().is_empty());
        assert_eq!(last_notice(&h.screen).kind, NoticeKind::Error);
        assert_eq!(last_notice(&h.screen).text, "Alias already exists");
    }

    #[tokio::test]
    async fn test_unexpected_save_failure_shows_generic_message() {
        let mut h = Harness::new();
        h.api
            .push_save(Err(ApiError::Http("connection refused".to_string())));
        h.screen.add();
        fill_create_example(&mut h.screen);

        let command = h.screen.submit();
        h.run_one(command).await;

        assert!(h.screen.editor().is_open());
        assert_eq!(last_notice(&h.screen).text, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_saving_blocks_second_submit() {
        let mut screen = ModelScreen::new(10);
        screen.add();
        fill_create_example(&mut screen);

        assert!(screen.submit().is_some());
        assert!(screen.submit().is_none());
    }

    #[test]
    fn test_cancel_ignored_while_saving() {
        let mut screen = ModelScreen::new(10);
        screen.add();
        fill_create_example(&mut screen);
        assert!(screen.submit().is_some());

        screen.cancel_editor();
        assert_eq!(screen.editor(), EditorState::Create);
        assert_eq!(screen.form().values.alias, "gpt4");

        screen.apply(Outcome::Saved {
            created: true,
            result: Err(ApiError::Rejected {
                code: 500,
                msg: "Alias already exists".to_string(),
            }),
        });
        screen.cancel_editor();
        assert_eq!(screen.editor(), EditorState::Closed);
    }

    #[test]
    fn test_second_export_ignored_while_running() {
        let mut screen = ModelScreen::new(10);
        screen.request_export();
        assert!(screen.confirm().is_some());
        assert!(screen.is_exporting());

        screen.request_export();
        assert!(screen.pending_confirm().is_none());

        screen.apply(Outcome::Exported(Ok(std::path::PathBuf::from("models.xlsx"))));
        screen.request_export();
        assert!(screen.pending_confirm().is_some());
    }

    #[tokio::test]
    async fn test_failed_edit_fetch_stays_closed() {
        let mut h = Harness::new();

        let command = h.screen.edit(404);
        assert_eq!(h.screen.fetching(), Some(404));
        h.run_one(command).await;

        assert_eq!(h.screen.editor(), EditorState::Closed);
        assert_eq!(h.screen.fetching(), None);
        assert_eq!(last_notice(&h.screen).text, "Model does not exist");
    }

    #[test]
    fn test_second_edit_ignored_while_fetching() {
        let mut screen = ModelScreen::new(10);
        assert_eq!(screen.edit(1), Some(Command::FetchForEdit(1)));
        assert_eq!(screen.edit(2), None);
    }

    #[tokio::test]
    async fn test_delete_one_requires_confirmation_then_reloads() {
        let mut h = Harness::new();
        h.screen.request_delete(3);
        assert_eq!(
            h.screen.pending_confirm().map(PendingConfirm::prompt),
            Some("Delete this record?")
        );
        assert!(h.api.calls().is_empty());

        let command = h.screen.confirm();
        h.run_one(command).await;

        assert_eq!(h.api.mutations(), vec![Call::Delete("3".to_string())]);
        assert_eq!(h.api.page_queries().len(), 1);
        assert!(h.screen.pending_confirm().is_none());
    }

    #[test]
    fn test_single_id_and_one_element_list_match() {
        let mut screen = ModelScreen::new(10);
        screen.request_delete(5);
        let single = screen.confirm();

        assert!(screen.request_delete_ids(vec![5]));
        let list = screen.confirm();

        assert_eq!(single, Some(Command::Delete(vec![5])));
        assert_eq!(single, list);
    }

    #[test]
    fn test_empty_delete_is_noop() {
        let mut screen = ModelScreen::new(10);
        assert!(!screen.request_delete_selected());
        assert!(screen.pending_confirm().is_none());
        assert!(screen.confirm().is_none());
    }

    #[tokio::test]
    async fn test_batch_delete_joins_selection() {
        let mut h = Harness::new();
        h.api.push_page(Ok(page(
            vec![record(1, "a"), record(2, "b"), record(3, "c")],
            3,
        )));
        let command = h.screen.reload();
        h.run(vec![command]).await;

        h.screen.toggle_selected(1);
        h.screen.toggle_selected(3);
        assert!(h.screen.request_delete_selected());
        assert_eq!(
            h.screen.pending_confirm().map(PendingConfirm::prompt),
            Some("Delete the selected records?")
        );

        h.api.push_page(Ok(page(vec![record(2, "b")], 1)));
        let command = h.screen.confirm();
        h.run_one(command).await;

        assert_eq!(h.api.mutations(), vec![Call::Delete("1,3".to_string())]);
        assert!(h.screen.selected().is_empty());
        assert_eq!(h.screen.records().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_delete_keeps_selection_without_reload() {
        let mut h = Harness::new();
        h.api.push_page(Ok(page(
            vec![record(1, "a"), record(2, "b"), record(3, "c")],
            3,
        )));
        let command = h.screen.reload();
        h.run(vec![command]).await;

        h.screen.toggle_selected(1);
        h.screen.toggle_selected(3);
        assert!(h.screen.request_delete_selected());

        h.api.push_save(Err(ApiError::Rejected {
            code: 500,
            msg: "In use".to_string(),
        }));
        let queries_before = h.api.page_queries().len();
        let command = h.screen.confirm();
        h.run_one(command).await;

        assert_eq!(h.api.mutations(), vec![Call::Delete("1,3".to_string())]);
        assert_eq!(last_notice(&h.screen).kind, NoticeKind::Error);
        assert_eq!(last_notice(&h.screen).text, "In use");
        assert_eq!(h.api.page_queries().len(), queries_before);
        assert_eq!(
            h.screen.selected().iter().copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(h.screen.records().len(), 3);
        assert!(h.screen.pending_confirm().is_none());
    }

    #[test]
    fn test_cancel_confirm_discards_action() {
        let mut screen = ModelScreen::new(10);
        screen.request_export();
        screen.cancel_confirm();
        assert!(screen.confirm().is_none());
        assert!(!screen.is_exporting());
    }

    #[tokio::test]
    async fn test_reload_after_mutation_uses_active_query() {
        let mut h = Harness::new();
        h.api.push_page(Ok(page(vec![record(1, "a")], 25)));
        h.screen.filter_draft_mut().model = " gpt ".to_string();
        let command = h.screen.search();
        h.run(vec![command]).await;

        h.api.push_page(Ok(page(vec![record(11, "k")], 25)));
        let command = h.screen.go_to_page(2);
        h.run_one(command).await;

        h.api.push_page(Ok(page(vec![record(11, "k")], 24)));
        h.screen.request_delete(11);
        let command = h.screen.confirm();
        h.run_one(command).await;

        let queries = h.api.page_queries();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[2].current, 2);
        assert_eq!(queries[2].filter.model, "gpt");
        assert_eq!(queries[2], queries[1]);
    }

    #[test]
    fn test_stale_listing_is_discarded() {
        let mut screen = ModelScreen::new(10);
        let Command::Reload { seq: first, .. } = screen.reload() else {
            unreachable!()
        };
        let Command::Reload { seq: second, .. } = screen.reload() else {
            unreachable!()
        };

        screen.apply(Outcome::Loaded {
            seq: second,
            result: Ok(page(vec![record(2, "new")], 1)),
        });
        screen.apply(Outcome::Loaded {
            seq: first,
            result: Ok(page(vec![record(1, "old")], 1)),
        });

        assert_eq!(screen.records()[0].alias, "new");
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_emptied_last_page_steps_back() {
        let mut h = Harness::new();
        h.api.push_page(Ok(page(vec![record(1, "a")], 11)));
        let command = h.screen.reload();
        h.run(vec![command]).await;
        h.api.push_page(Ok(page(vec![record(11, "k")], 11)));
        let command = h.screen.go_to_page(2);
        h.run_one(command).await;

        h.api.push_page(Ok(page(Vec::new(), 10)));
        h.api.push_page(Ok(page(vec![record(1, "a")], 10)));
        h.screen.request_delete(11);
        let command = h.screen.confirm();
        h.run_one(command).await;

        assert_eq!(h.screen.query().current, 1);
        let queries = h.api.page_queries();
        assert_eq!(queries.last().map(|q| q.current), Some(1));
        assert_eq!(h.screen.records().len(), 1);
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_rows() {
        let mut h = Harness::new();
        h.api.push_page(Ok(page(vec![record(1, "a")], 1)));
        let command = h.screen.reload();
        h.run(vec![command]).await;

        h.api.push_page(Err(ApiError::Decode("bad json".to_string())));
        let command = h.screen.reload();
        h.run(vec![command]).await;

        assert_eq!(h.screen.records().len(), 1);
        assert!(!h.screen.is_loading());
        assert_eq!(last_notice(&h.screen).text, GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_export_confirms_and_does_not_reload() {
        let mut h = Harness::new();
        h.api.push_export(Ok(ExportFile {
            file_name: Some("models.xlsx".to_string()),
            bytes: b"PK".to_vec(),
        }));
        h.screen.filter_draft_mut().model_supplier = "openai".to_string();

        h.screen.request_export();
        assert_eq!(
            h.screen.pending_confirm().map(PendingConfirm::prompt),
            Some("Export data?")
        );
        let command = h.screen.confirm();
        assert!(h.screen.is_exporting());
        h.run_one(command).await;

        let mutations = h.api.mutations();
        let Call::Export(filter) = &mutations[0] else {
            panic!("expected export, got {:?}", mutations);
        };
        assert_eq!(filter.model_supplier, "openai");
        assert!(h.api.page_queries().is_empty());
        assert!(!h.screen.is_exporting());
        assert!(last_notice(&h.screen).text.starts_with("Exported to "));
        assert!(h.executor.export_dir().join("models.xlsx").exists());
    }

    #[test]
    fn test_pagination_bounds() {
        let mut screen = ModelScreen::new(10);
        screen.apply(Outcome::Loaded {
            seq: 0,
            result: Ok(page(vec![record(1, "a")], 35)),
        });
        assert_eq!(screen.page_count(), 4);

        assert!(screen.go_to_page(1).is_none());
        let Some(Command::Reload { query, .. }) = screen.go_to_page(99) else {
            panic!("expected reload");
        };
        assert_eq!(query.current, 4);

        let Some(Command::Reload { query, .. }) = screen.set_page_size(20) else {
            panic!("expected reload");
        };
        assert_eq!(query.current, 1);
        assert_eq!(query.page_size, 20);
        assert!(screen.set_page_size(20).is_none());
    }

    #[test]
    fn test_selection_follows_page() {
        let mut screen = ModelScreen::new(10);
        let command = screen.reload();
        let Command::Reload { seq, .. } = command else {
            unreachable!()
        };
        screen.apply(Outcome::Loaded {
            seq,
            result: Ok(page(vec![record(1, "a"), record(2, "b")], 2)),
        });

        screen.set_all_selected(true);
        assert!(screen.all_selected());
        screen.toggle_selected(2);
        assert!(!screen.all_selected());
        assert!(screen.is_selected(1));

        let Command::Reload { seq, .. } = screen.reload() else {
            unreachable!()
        };
        screen.apply(Outcome::Loaded {
            seq,
            result: Ok(page(vec![record(2, "b")], 1)),
        });
        assert!(screen.selected().is_empty());
    }

    #[test]
    fn test_reset_filter_clears_draft() {
        let mut screen = ModelScreen::new(10);
        screen.filter_draft_mut().alias = "x".to_string();
        let _ = screen.search();
        assert_eq!(screen.query().filter.alias, "x");

        let Command::Reload { query, .. } = screen.reset_filter() else {
            unreachable!()
        };
        assert!(query.filter.is_empty());
        assert!(screen.filter_draft().is_empty());
    }

    #[test]
    fn test_notices_expire() {
        let mut screen = ModelScreen::new(10);
        screen.push_notice(Notice::info("hello"));
        let at = screen.notices()[0].at;

        screen.expire_notices(at);
        assert_eq!(screen.notices().len(), 1);
        screen.expire_notices(at + chrono::Duration::seconds(10));
        assert!(screen.notices().is_empty());
    }
}
