//! Error handling for the SharedId provider
//!
//! This module defines error types and formatting helpers used throughout the crate.

pub mod formatting;
pub mod types;

pub use formatting::{format_error, format_error_for_logging};
pub use types::{Error, Result};
