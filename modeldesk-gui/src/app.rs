//! Main application state and update loop.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use modeldesk_core::{
    ApiError, Command, CommandExecutor, Database, HttpModelApi, ModelScreen, Notice, Outcome,
    Settings, Theme,
};

use crate::ui;
use crate::ui::settings::SettingsTab;

// =============================================================================
// Application State
// =============================================================================

/// Main application state.
pub struct ModelDeskApp {
    /// Tokio runtime for backend calls.
    pub runtime: Runtime,

    /// Database connection.
    pub db: Database,

    /// User settings.
    pub settings: Settings,

    /// Listing, editor and confirmation state.
    pub screen: ModelScreen,

    // -------------------------------------------------------------------------
    // Command plumbing
    // -------------------------------------------------------------------------
    /// Runs commands against the backend; `None` if the backend URL is unusable.
    executor: Option<Arc<CommandExecutor>>,

    /// Outcomes sent back by spawned commands.
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,

    // -------------------------------------------------------------------------
    // UI State
    // -------------------------------------------------------------------------
    /// Show settings dialog.
    pub show_settings: bool,

    /// Active tab of the settings dialog.
    pub settings_tab: SettingsTab,

    /// Pending folder selection result receiver.
    folder_result_rx: Option<tokio::sync::oneshot::Receiver<Option<PathBuf>>>,
}

impl ModelDeskApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime) -> anyhow::Result<Self> {
        info!("Initializing ModelDeskApp");

        // Open database
        let db = match Database::open() {
            Ok(db) => {
                if let Err(e) = db.migrate() {
                    error!("Failed to migrate database: {}", e);
                }
                db
            }
            Err(e) => {
                error!("Failed to open database: {}", e);
                let db = Database::open_in_memory()?;
                db.migrate()?;
                db
            }
        };

        // Load settings
        let mut settings = Settings::load(&db);
        settings.apply_env_overrides();
        debug!(
            api_base_url = %settings.api_base_url,
            page_size = settings.page_size,
            "Loaded settings"
        );

        apply_theme(&cc.egui_ctx, settings.theme);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        cc.egui_ctx.set_style(style);

        let (outcome_tx, outcome_rx) = unbounded_channel();

        let mut app = Self {
            runtime,
            db,
            screen: ModelScreen::new(settings.page_size),
            executor: None,
            settings,
            outcome_tx,
            outcome_rx,
            show_settings: false,
            settings_tab: SettingsTab::default(),
            folder_result_rx: None,
        };

        app.rebuild_executor();
        let commands = app.screen.start();
        app.dispatch(&cc.egui_ctx, commands);

        Ok(app)
    }

    /// Recreate the backend client from the current settings.
    fn rebuild_executor(&mut self) {
        match HttpModelApi::from_settings(&self.settings) {
            Ok(api) => {
                info!(base_url = api.base_url(), "Backend configured");
                let export_dir = self.settings.resolved_export_dir();
                self.executor = Some(Arc::new(CommandExecutor::new(Arc::new(api), export_dir)));
            }
            Err(e) => {
                error!(error = %e, "Invalid backend configuration");
                self.executor = None;
                self.screen
                    .push_notice(Notice::error(format!("Backend is not configured: {}", e)));
            }
        }
    }

    /// Spawn commands on the runtime; their outcomes arrive through the channel.
    pub fn dispatch(&self, ctx: &egui::Context, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            let Some(executor) = self.executor.clone() else {
                let outcome = Outcome::failure(
                    command,
                    ApiError::Http("backend is not configured".to_string()),
                );
                // Applied on the next frame like any other outcome.
                let _ = self.outcome_tx.send(outcome);
                continue;
            };

            let tx = self.outcome_tx.clone();
            let ctx = ctx.clone();
            self.runtime.spawn(async move {
                let outcome = executor.run(command).await;
                if tx.send(outcome).is_err() {
                    warn!("Outcome channel closed");
                }
                ctx.request_repaint();
            });
        }
    }

    /// Apply finished commands and dispatch their follow-ups.
    fn process_outcomes(&mut self, ctx: &egui::Context) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            let follow_ups = self.screen.apply(outcome);
            self.dispatch(ctx, follow_ups);
        }
    }

    /// Save settings to the database and apply them.
    pub fn save_settings(&mut self, ctx: &egui::Context) {
        self.settings.validate();
        if let Err(e) = self.settings.save(&self.db) {
            error!("Failed to save settings: {}", e);
            self.screen
                .push_notice(Notice::error("Failed to save settings"));
            return;
        }

        self.rebuild_executor();
        let reload = self
            .screen
            .set_page_size(self.settings.page_size)
            .unwrap_or_else(|| self.screen.reload());
        self.dispatch(ctx, [reload]);
        self.screen.push_notice(Notice::success("Settings saved"));
    }

    /// Discard unsaved settings changes.
    pub fn revert_settings(&mut self, ctx: &egui::Context) {
        self.settings = Settings::load(&self.db);
        self.settings.apply_env_overrides();
        apply_theme(ctx, self.settings.theme);
    }

    /// Switch theme and persist it.
    pub fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        self.settings.theme = theme;
        apply_theme(ctx, theme);
        if let Err(e) = self.settings.save(&self.db) {
            error!("Failed to save settings: {}", e);
        }
    }

    /// Open a folder selection dialog asynchronously.
    pub fn open_export_dir_dialog(&mut self) {
        // Don't open another dialog if one is pending
        if self.folder_result_rx.is_some() {
            return;
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.folder_result_rx = Some(rx);

        let start_dir = self.settings.resolved_export_dir();
        self.runtime.spawn(async move {
            let folder = rfd::AsyncFileDialog::new()
                .set_directory(start_dir)
                .pick_folder()
                .await
                .map(|f| f.path().to_path_buf());
            let _ = tx.send(folder);
        });
    }

    /// Check for folder selection completion.
    fn check_folder_selection(&mut self) {
        if let Some(mut rx) = self.folder_result_rx.take() {
            match rx.try_recv() {
                Ok(Some(folder)) => {
                    info!("Selected export folder: {}", folder.display());
                    self.settings.export_dir = Some(folder.to_string_lossy().to_string());
                }
                Ok(None) => {
                    debug!("Folder selection cancelled");
                }
                Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {
                    // Still waiting
                    self.folder_result_rx = Some(rx);
                }
                Err(tokio::sync::oneshot::error::TryRecvError::Closed) => {
                    warn!("Folder selection channel closed unexpectedly");
                }
            }
        }
    }

    /// Whether a folder dialog is open.
    pub fn is_picking_folder(&self) -> bool {
        self.folder_result_rx.is_some()
    }

    /// Whether a modal window is covering the listing.
    pub fn modal_open(&self) -> bool {
        self.show_settings
            || self.screen.editor().is_open()
            || self.screen.pending_confirm().is_some()
    }
}

/// Apply the theme's visuals.
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
}

impl eframe::App for ModelDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for async completions
        self.check_folder_selection();
        self.process_outcomes(ctx);
        self.screen.expire_notices(chrono::Local::now());

        // Top panel with menu
        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            ui::menu::render(self, ui, ctx);
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_panel")
            .max_height(24.0)
            .show(ctx, |ui| {
                ui::status::render(self, ui);
            });

        // Search form and actions above the table
        let modal_open = self.modal_open();
        egui::TopBottomPanel::top("toolbar_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| ui::toolbar::render(self, ui, ctx));
            });

        // Listing (fills remaining space)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| ui::table::render(self, ui, ctx));
        });

        // Windows on top
        if self.screen.editor().is_open() {
            ui::editor::render(self, ctx);
        }
        if self.screen.pending_confirm().is_some() {
            ui::confirm::render(self, ctx);
        }
        if self.show_settings {
            ui::settings::render(self, ctx);
        }
        ui::notices::render(self, ctx);

        // Keep polling while waiting for async ops
        if self.screen.is_busy() || self.is_picking_folder() {
            ctx.request_repaint();
        } else if !self.screen.notices().is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}
