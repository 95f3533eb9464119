//! The AI model record manager screen, without any UI.
//!
//! This module provides:
//! - `ModelScreen` - listing, editor, confirmation and notice state
//! - `Command` / `Outcome` - side effects requested by the screen and their results
//! - `CommandExecutor` - runs commands against a `ModelApi`
//! - `drive` - runs a command queue to completion (used by tests and tools)

mod command;
mod executor;
mod notice;
mod state;

pub use command::{Command, Outcome};
pub use executor::{default_export_name, drive, CommandExecutor};
pub use notice::{Notice, NoticeKind};
pub use state::{EditorState, ModelScreen, PendingConfirm};
