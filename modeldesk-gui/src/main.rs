//! Modeldesk GUI Application
//!
//! A native desktop manager for AI model configuration records.

mod app;
mod ui;

use eframe::egui;
use modeldesk_core::{Database, RenderMode, Settings};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("modeldesk=debug".parse().unwrap())
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Modeldesk v{}", modeldesk_core::VERSION);

    // Hardware acceleration is fixed at window creation, so the render mode
    // has to be known before eframe::run_native().
    let render_mode = load_render_mode();
    let hardware_acceleration = match render_mode {
        RenderMode::Auto => eframe::HardwareAcceleration::Preferred,
        RenderMode::Software => eframe::HardwareAcceleration::Off,
    };
    tracing::info!(?render_mode, "Render mode configured");

    // Create tokio runtime for backend calls
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let _guard = runtime.enter();

    // Window configuration
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 560.0])
            .with_title("Modeldesk - AI Model Configuration"),
        hardware_acceleration,
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Modeldesk",
        options,
        Box::new(|cc| Ok(Box::new(app::ModelDeskApp::new(cc, runtime)?))),
    )
}

/// Load only the render mode from persisted settings.
///
/// Opens a temporary DB connection just to read the setting, then drops it.
fn load_render_mode() -> RenderMode {
    match Database::open() {
        Ok(db) => {
            if let Err(e) = db.migrate() {
                tracing::warn!("Failed to migrate DB for render mode: {e}");
            }
            Settings::load(&db).render_mode
        }
        Err(e) => {
            tracing::warn!("Failed to open DB for render mode: {e}, using Auto");
            RenderMode::Auto
        }
    }
}
