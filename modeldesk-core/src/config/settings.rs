//! Application settings for Modeldesk.
//!
//! Settings are persisted to the SQLite database as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Theme Selection
// =============================================================================

/// App theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    /// Dark theme (easier on the eyes)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl Theme {
    /// Get all available themes.
    pub fn all() -> &'static [Theme] {
        &[Self::Dark, Self::Light]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "Dark"),
            Self::Light => write!(f, "Light"),
        }
    }
}

/// Renderer selection, applied at window creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    /// Hardware acceleration when available.
    #[default]
    Auto,
    /// CPU rendering for VMs and remote desktops.
    Software,
}

// =============================================================================
// Defaults
// =============================================================================

/// Backend used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Rows per page of the listing.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the persisted backend URL.
pub const API_BASE_URL_ENV: &str = "MODELDESK_API_BASE_URL";

const SETTINGS_KEY: &str = "settings";

// =============================================================================
// Application Settings
// =============================================================================

/// Application settings - persisted to database as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the backend REST service.
    pub api_base_url: String,

    /// Optional bearer token attached to every request.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Rows per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where exported files are written. `None` means the download directory.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// UI theme.
    #[serde(default)]
    pub theme: Theme,

    /// Renderer (requires restart).
    #[serde(default)]
    pub render_mode: RenderMode,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            export_dir: None,
            theme: Theme::default(),
            render_mode: RenderMode::default(),
        }
    }
}

impl Settings {
    /// Load settings from database, using defaults for missing values.
    ///
    /// If settings don't exist or can't be parsed, returns defaults.
    pub fn load(db: &crate::db::Database) -> Self {
        let mut settings = Self::default();

        if let Ok(Some(json)) = db.get_setting(SETTINGS_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(loaded) => settings = loaded,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse settings, using defaults");
                }
            }
        }

        settings.validate();
        settings
    }

    /// Save settings to database.
    pub fn save(&self, db: &crate::db::Database) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        db.set_setting(SETTINGS_KEY, &json)?;
        Ok(())
    }

    /// Validate and clamp settings to valid ranges.
    pub fn validate(&mut self) {
        self.page_size = self.page_size.clamp(1, 100);
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 300);

        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        if self
            .api_token
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            self.api_token = None;
        }
        if self
            .export_dir
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            self.export_dir = None;
        }
    }

    /// Apply `MODELDESK_API_BASE_URL` if it is set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_base_url_override(std::env::var(API_BASE_URL_ENV).ok());
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(url = %url, "Using backend URL from environment");
            self.api_base_url = url;
            self.validate();
        }
    }

    /// Directory exported files are written to.
    ///
    /// Falls back to the download directory, then the home directory, then
    /// the current directory.
    pub fn resolved_export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return PathBuf::from(dir);
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// =============================================================================
// Tests
// =============================================================================
