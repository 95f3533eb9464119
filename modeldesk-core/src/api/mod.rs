//! Backend access for model configuration records.
//!
//! This module provides:
//! - `ModelApi` - the async contract the screen drives
//! - `HttpModelApi` - the reqwest implementation
//! - `ApiResponse` / `ApiError` - envelope decoding and error classification

mod client;
mod error;
mod http;
mod response;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{join_ids, ExportFile, ModelApi};
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use http::{file_name_from_disposition, HttpModelApi};
pub use response::{ApiResponse, SUCCESS_CODE};
