//! Configuration module for Modeldesk.
//!
//! Manages application settings stored in SQLite.

mod settings;

pub use settings::{
    RenderMode, Settings, Theme, API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
