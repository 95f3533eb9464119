//! Modeldesk Core Library
//!
//! This crate provides the core functionality for Modeldesk, a desktop
//! manager for AI model configuration records. It includes:
//!
//! - The `ModelConfig` record, listing queries and dictionary options
//! - A REST client for the model configuration backend
//! - Editor form validation
//! - The record manager screen state machine and command executor
//! - Configuration management (settings, preferences)
//! - Database layer for settings

pub mod api;
pub mod config;
pub mod db;
pub mod form;
pub mod models;
pub mod screen;

// Re-exports for convenience
pub use config::{RenderMode, Settings, Theme};
pub use db::Database;

// Re-export backend access
pub use api::{ApiError, ExportFile, HttpModelApi, ModelApi};

// Re-export records
pub use models::{DictionaryOption, ModelConfig, ModelFilter, ModelId, Page, PageQuery};

// Re-export the editor form
pub use form::{Field, FormError, ModelForm};

// Re-export the screen
pub use screen::{
    Command, CommandExecutor, EditorState, ModelScreen, Notice, NoticeKind, Outcome,
    PendingConfirm,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
